//! Routers de la API
//!
//! Un router por entidad (convención create_x_router) anidado bajo /api,
//! más el health check y la capa CORS.

pub mod agent_routes;
pub mod auth_routes;
pub mod client_routes;
pub mod company_routes;
pub mod contract_routes;
pub mod fleet_routes;
pub mod lead_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Construir el router completo de la aplicación
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/fleet", fleet_routes::create_fleet_router())
        .nest("/api/clients", client_routes::create_client_router())
        .nest("/api/agents", agent_routes::create_agent_router())
        .nest("/api/contracts", contract_routes::create_contract_router())
        .nest("/api/leads", lead_routes::create_lead_router())
        .nest("/api/company", company_routes::create_company_router())
        .nest("/api/reports", company_routes::create_report_router())
        .nest("/api/auth", auth_routes::create_auth_router())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rentsync-backend",
        "status": "healthy"
    }))
}
