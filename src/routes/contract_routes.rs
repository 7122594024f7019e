//! Rutas de contratos

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::contract_controller::ContractController;
use crate::dto::contract_dto::{CreateContractRequest, QuoteRequest, UpdatePhotosRequest};
use crate::dto::ApiResponse;
use crate::models::ai::QuoteDetails;
use crate::models::contract::Contract;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contract))
        .route("/", get(list_contracts))
        .route("/:id", get(get_contract))
        .route("/:id/photos", put(update_photos))
        .route("/:id/complete", post(complete_contract))
        .route("/quote", post(quote))
}

async fn create_contract(
    State(state): State<AppState>,
    Json(request): Json<CreateContractRequest>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let controller = ContractController::new(state);
    Ok(Json(controller.create(request).await?))
}

async fn list_contracts(State(state): State<AppState>) -> Json<Vec<Contract>> {
    let controller = ContractController::new(state);
    Json(controller.list().await)
}

async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Contract>, AppError> {
    let controller = ContractController::new(state);
    Ok(Json(controller.get(id).await?))
}

async fn update_photos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePhotosRequest>,
) -> Result<Json<Contract>, AppError> {
    let controller = ContractController::new(state);
    Ok(Json(controller.update_photos(id, request).await?))
}

async fn complete_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Contract>, AppError> {
    let controller = ContractController::new(state);
    Ok(Json(controller.complete(id).await?))
}

async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteDetails>, AppError> {
    let controller = ContractController::new(state);
    Ok(Json(controller.quote(request).await?))
}
