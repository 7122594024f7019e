//! Modelo de Agent
//!
//! Sub-agentes con mandato activo: nickname único como handle de login
//! (magic link), comisión porcentual y datos de facturación.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del mandato del agente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentStatus {
    Attivo,
    Sospeso,
}

/// Datos de facturación del agente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingInfo {
    pub iban: String,
    pub vat_number: String,
    pub bank_name: String,
    pub payment_terms: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    /// Handle de login, único; el matching es case-insensitive
    pub nickname: String,
    pub region: String,
    /// Porcentaje de comisión sobre el total del contrato
    pub commission_rate: Decimal,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<BillingInfo>,
    pub created_at: DateTime<Utc>,
}
