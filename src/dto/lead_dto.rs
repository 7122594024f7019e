//! DTOs de leads de marketing

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::lead::{LeadStatus, MarketingLead};

/// Alta manual de lead
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    /// Vacío cae al nombre
    #[serde(default)]
    pub company: String,

    /// Vacío cae a un interés genérico de noleggio
    #[serde(default)]
    pub interest: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Texto pegado del textarea `Nombre, Empresa, Interés, Ubicación`
#[derive(Debug, Deserialize, Validate)]
pub struct ImportLeadsRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ImportLeadsResponse {
    pub imported: usize,
    pub leads: Vec<MarketingLead>,
}

/// Búsqueda AI con grounding; api_key permite reintentar con otra
/// credencial cuando la cuota se agota
#[derive(Debug, Deserialize, Validate)]
pub struct LeadSearchRequest {
    #[validate(length(min = 2, max = 300))]
    pub target_segment: String,

    #[validate(length(min = 2, max = 100))]
    pub location: String,

    pub api_key: Option<String>,
}

/// Actualización de la ficha del lead
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,

    pub company: Option<String>,
    pub interest: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Transición de estado del lead
#[derive(Debug, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

/// Email AI para un lead
#[derive(Debug, Deserialize, Validate)]
pub struct MarketingCopyRequest {
    #[validate(length(min = 2, max = 50))]
    pub tone: String,

    /// Vehículos a proponer en el email
    #[serde(default)]
    pub car_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MarketingCopyResponse {
    pub body: String,
}
