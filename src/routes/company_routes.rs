//! Rutas del perfil de empresa e informes

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::company_dto::{
    CompanyBioResponse, StrategicReportResponse, UpdateCompanyRequest,
};
use crate::dto::ApiResponse;
use crate::models::company::CompanyProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_company))
        .route("/", put(update_company))
        .route("/bio", post(generate_bio))
}

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/strategic", post(strategic_report))
}

async fn get_company(State(state): State<AppState>) -> Json<CompanyProfile> {
    let controller = CompanyController::new(state);
    Json(controller.get().await)
}

async fn update_company(
    State(state): State<AppState>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyProfile>>, AppError> {
    let controller = CompanyController::new(state);
    Ok(Json(controller.update(request).await?))
}

async fn generate_bio(
    State(state): State<AppState>,
) -> Result<Json<CompanyBioResponse>, AppError> {
    let controller = CompanyController::new(state);
    Ok(Json(controller.generate_bio().await?))
}

async fn strategic_report(
    State(state): State<AppState>,
) -> Result<Json<StrategicReportResponse>, AppError> {
    let controller = CompanyController::new(state);
    Ok(Json(controller.strategic_report().await?))
}
