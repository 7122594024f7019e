//! Rutas de clientes

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::client_controller::ClientController;
use crate::dto::client_dto::{
    AddDocumentRequest, CreateClientRequest, RiskAnalysisRequest, UpdateClientRequest,
};
use crate::dto::ApiResponse;
use crate::models::ai::RiskAnalysisResult;
use crate::models::client::Client;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_client))
        .route("/", get(list_clients))
        .route("/:id", get(get_client))
        .route("/:id", put(update_client))
        .route("/:id", delete(delete_client))
        .route("/:id/risk-analysis", post(analyze_risk))
        .route("/:id/documents", post(add_document))
}

async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let controller = ClientController::new(state);
    Ok(Json(controller.create(request).await?))
}

async fn list_clients(State(state): State<AppState>) -> Json<Vec<Client>> {
    let controller = ClientController::new(state);
    Json(controller.list().await)
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let controller = ClientController::new(state);
    Ok(Json(controller.get(id).await?))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let controller = ClientController::new(state);
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ClientController::new(state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente eliminado exitosamente"
    })))
}

async fn analyze_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RiskAnalysisRequest>,
) -> Result<Json<RiskAnalysisResult>, AppError> {
    let controller = ClientController::new(state);
    Ok(Json(controller.analyze_risk(id, request).await?))
}

async fn add_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddDocumentRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ClientController::new(state);
    Ok(Json(controller.add_document(id, request).await?))
}
