//! DTOs de la API
//!
//! Requests tipados (con validación) y el envelope común de respuesta.
//! Las respuestas de entidad serializan directamente los modelos.

pub mod agent_dto;
pub mod auth_dto;
pub mod car_dto;
pub mod client_dto;
pub mod company_dto;
pub mod contract_dto;
pub mod lead_dto;

use serde::Serialize;

/// Envelope común de respuesta de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
        }
    }
}
