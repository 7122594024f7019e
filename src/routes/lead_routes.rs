//! Rutas de leads

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::lead_controller::LeadController;
use crate::dto::lead_dto::{
    CreateLeadRequest, ImportLeadsRequest, ImportLeadsResponse, LeadSearchRequest,
    MarketingCopyRequest, MarketingCopyResponse, UpdateLeadRequest, UpdateLeadStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::ai::LeadSearchResult;
use crate::models::lead::MarketingLead;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_lead_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lead))
        .route("/", get(list_leads))
        .route("/:id", put(update_lead))
        .route("/:id/status", put(update_lead_status))
        .route("/import", post(import_leads))
        .route("/search", post(search_leads))
        .route("/:id/marketing-copy", post(marketing_copy))
}

async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> Result<Json<ApiResponse<MarketingLead>>, AppError> {
    let controller = LeadController::new(state);
    Ok(Json(controller.create(request).await?))
}

async fn list_leads(State(state): State<AppState>) -> Json<Vec<MarketingLead>> {
    let controller = LeadController::new(state);
    Json(controller.list().await)
}

async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<ApiResponse<MarketingLead>>, AppError> {
    let controller = LeadController::new(state);
    Ok(Json(controller.update(id, request).await?))
}

async fn update_lead_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadStatusRequest>,
) -> Result<Json<MarketingLead>, AppError> {
    let controller = LeadController::new(state);
    Ok(Json(controller.update_status(id, request).await?))
}

async fn import_leads(
    State(state): State<AppState>,
    Json(request): Json<ImportLeadsRequest>,
) -> Result<Json<ImportLeadsResponse>, AppError> {
    let controller = LeadController::new(state);
    Ok(Json(controller.import(request).await?))
}

async fn search_leads(
    State(state): State<AppState>,
    Json(request): Json<LeadSearchRequest>,
) -> Result<Json<LeadSearchResult>, AppError> {
    let controller = LeadController::new(state);
    Ok(Json(controller.search(request).await?))
}

async fn marketing_copy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MarketingCopyRequest>,
) -> Result<Json<MarketingCopyResponse>, AppError> {
    let controller = LeadController::new(state);
    Ok(Json(controller.marketing_copy(id, request).await?))
}
