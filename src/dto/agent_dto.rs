//! DTOs de agentes (mandatos)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::agent::AgentStatus;

/// Datos de facturación del formulario de mandato
#[derive(Debug, Deserialize, Validate)]
pub struct BillingInfoRequest {
    #[validate(length(min = 15, max = 34))]
    pub iban: String,

    #[validate(length(min = 11, max = 11))]
    pub vat_number: String,

    #[validate(length(min = 2, max = 100))]
    pub bank_name: String,

    #[validate(length(min = 2, max = 100))]
    pub payment_terms: String,
}

/// Activación de mandato: nickname y región son obligatorios
#[derive(Debug, Deserialize, Validate)]
pub struct ActivateMandateRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    #[validate(length(min = 2, max = 50))]
    pub nickname: String,

    #[validate(length(min = 2, max = 100))]
    pub region: String,

    pub commission_rate: Decimal,

    #[validate]
    pub billing: Option<BillingInfoRequest>,
}

/// Actualización del mandato. El nickname no se toca: es el handle
/// de login y los magic links ya emitidos lo referencian.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgentRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub region: Option<String>,

    pub commission_rate: Option<Decimal>,

    #[validate]
    pub billing: Option<BillingInfoRequest>,
}

/// Suspender / reactivar el mandato
#[derive(Debug, Deserialize)]
pub struct UpdateAgentStatusRequest {
    pub status: AgentStatus,
}

/// Magic link compartible del agente
#[derive(Debug, Serialize)]
pub struct MagicLinkResponse {
    pub url: String,
    pub nickname: String,
}
