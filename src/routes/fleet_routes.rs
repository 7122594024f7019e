//! Rutas de flota

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fleet_controller::FleetController;
use crate::dto::car_dto::{
    CarDetailsPrefillRequest, CreateCarRequest, RecommendationRequest, UpdateCarRequest,
    UpdateCarStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::ai::{AiRecommendation, CarDetailsSuggestion};
use crate::models::car::Car;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_car))
        .route("/", get(list_cars))
        .route("/:id", get(get_car))
        .route("/:id", put(update_car))
        .route("/:id", delete(delete_car))
        .route("/:id/status", put(update_car_status))
        .route("/:id/cycle-status", post(cycle_car_status))
        .route("/recommendations", post(recommend_cars))
        .route("/ai/car-details", post(car_details))
}

async fn create_car(
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    let controller = FleetController::new(state);
    Ok(Json(controller.create(request).await?))
}

async fn list_cars(State(state): State<AppState>) -> Json<Vec<Car>> {
    let controller = FleetController::new(state);
    Json(controller.list().await)
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Car>, AppError> {
    let controller = FleetController::new(state);
    Ok(Json(controller.get(id).await?))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    let controller = FleetController::new(state);
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = FleetController::new(state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}

async fn update_car_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarStatusRequest>,
) -> Result<Json<Car>, AppError> {
    let controller = FleetController::new(state);
    Ok(Json(controller.update_status(id, request).await?))
}

async fn cycle_car_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Car>, AppError> {
    let controller = FleetController::new(state);
    Ok(Json(controller.cycle_status(id).await?))
}

async fn recommend_cars(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Vec<AiRecommendation>> {
    let controller = FleetController::new(state);
    Json(controller.recommend(request).await)
}

async fn car_details(
    State(state): State<AppState>,
    Json(request): Json<CarDetailsPrefillRequest>,
) -> Result<Json<CarDetailsSuggestion>, AppError> {
    let controller = FleetController::new(state);
    Ok(Json(controller.car_details(request).await?))
}
