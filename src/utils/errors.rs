//! Errores de la aplicación
//!
//! Un único enum con conversión a respuesta HTTP JSON. El gateway AI
//! aporta dos variantes propias: fallo genérico del proveedor (502) y
//! cuota agotada (429), que el cliente trata de forma distinta.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("AI quota exceeded: {0}")]
    AiQuotaExceeded(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::AiQuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
            AppError::AiQuotaExceeded(_) => "AI_QUOTA_EXCEEDED",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation Error",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "Not Found",
            AppError::Conflict(_) => "Conflict",
            AppError::BadRequest(_) => "Bad Request",
            AppError::Internal(_) => "Internal Server Error",
            AppError::ExternalApi(_) => "External API Error",
            AppError::AiQuotaExceeded(_) => "AI Quota Exceeded",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        // Los internos no exponen el mensaje crudo; el resto sí.
        let (message, details) = match &self {
            AppError::Validation(e) => (
                "The provided data is invalid".to_string(),
                Some(json!(e)),
            ),
            AppError::Internal(msg) => (
                "An unexpected error occurred".to_string(),
                Some(json!({ "internal_error": msg })),
            ),
            AppError::ExternalApi(msg) => (
                "An error occurred while communicating with the AI service".to_string(),
                Some(json!({ "external_api_error": msg })),
            ),
            AppError::AiQuotaExceeded(msg) => (
                "The AI service quota is exhausted. Try a different API key".to_string(),
                Some(json!({ "provider_error": msg })),
            ),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg) => (msg.clone(), None),
        };

        let body = ErrorResponse {
            error: self.title().to_string(),
            message,
            details,
            code: Some(self.code().to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}
