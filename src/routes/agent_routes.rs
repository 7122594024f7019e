//! Rutas de agentes

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::agent_controller::AgentController;
use crate::dto::agent_dto::{
    ActivateMandateRequest, MagicLinkResponse, UpdateAgentRequest, UpdateAgentStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::agent::Agent;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_agent_router() -> Router<AppState> {
    Router::new()
        .route("/", post(activate_mandate))
        .route("/", get(list_agents))
        .route("/:id", get(get_agent))
        .route("/:id", put(update_agent))
        .route("/:id/status", put(update_agent_status))
        .route("/:id/magic-link", get(magic_link))
}

async fn activate_mandate(
    State(state): State<AppState>,
    Json(request): Json<ActivateMandateRequest>,
) -> Result<Json<ApiResponse<Agent>>, AppError> {
    let controller = AgentController::new(state);
    Ok(Json(controller.activate_mandate(request).await?))
}

async fn list_agents(State(state): State<AppState>) -> Json<Vec<Agent>> {
    let controller = AgentController::new(state);
    Json(controller.list().await)
}

async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Agent>, AppError> {
    let controller = AgentController::new(state);
    Ok(Json(controller.get(id).await?))
}

async fn update_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAgentRequest>,
) -> Result<Json<ApiResponse<Agent>>, AppError> {
    let controller = AgentController::new(state);
    Ok(Json(controller.update(id, request).await?))
}

async fn update_agent_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAgentStatusRequest>,
) -> Result<Json<Agent>, AppError> {
    let controller = AgentController::new(state);
    Ok(Json(controller.update_status(id, request).await?))
}

async fn magic_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MagicLinkResponse>, AppError> {
    let controller = AgentController::new(state);
    Ok(Json(controller.magic_link(id).await?))
}
