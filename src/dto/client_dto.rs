//! DTOs de clientes

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::client::{ClientStatus, ClientType};

/// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 5, max = 30))]
    pub phone: String,

    #[serde(rename = "type")]
    pub client_type: ClientType,

    /// Obligatoria cuando client_type == Azienda
    pub vat_number: Option<String>,

    pub fiscal_code: Option<String>,

    pub subagent_id: Option<Uuid>,
}

/// Request para actualizar un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,

    pub status: Option<ClientStatus>,
    pub vat_number: Option<String>,
    pub fiscal_code: Option<String>,
    pub subagent_id: Option<Uuid>,
}

/// Input libre del análisis de riesgo AI
#[derive(Debug, Deserialize, Validate)]
pub struct RiskAnalysisRequest {
    /// Datos financieros en texto libre (declaración del cliente)
    #[validate(length(min = 5, max = 4000))]
    pub financials: String,
}

/// Registro local de un documento (base64 o blob-url, sin upload)
#[derive(Debug, Deserialize, Validate)]
pub struct AddDocumentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub content: String,
}
