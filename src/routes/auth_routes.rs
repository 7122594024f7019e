//! Rutas de autenticación

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AgencyLoginRequest, AgentLoginRequest, LogoutRequest, MagicLinkQuery, SessionResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(agency_login))
        .route("/agent-login", post(agent_login))
        .route("/magic-link", get(magic_link_login))
        .route("/logout", post(logout))
}

async fn agency_login(
    State(state): State<AppState>,
    Json(request): Json<AgencyLoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let controller = AuthController::new(state);
    Ok(Json(controller.agency_login(request).await?))
}

async fn agent_login(
    State(state): State<AppState>,
    Json(request): Json<AgentLoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let controller = AuthController::new(state);
    Ok(Json(controller.agent_login(request).await?))
}

/// Auto-login por magic link: GET /api/auth/magic-link?agent_ref=<nickname>
async fn magic_link_login(
    State(state): State<AppState>,
    Query(query): Query<MagicLinkQuery>,
) -> Result<Json<SessionResponse>, AppError> {
    let controller = AuthController::new(state);
    Ok(Json(controller.magic_link_login(&query.agent_ref).await?))
}

async fn logout(
    State(state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Json<ApiResponse<()>> {
    let controller = AuthController::new(state);
    Json(controller.logout(request).await)
}
