//! Modelo de Contract
//!
//! Contratos de alquiler: referencias débiles a agente/cliente/vehículo,
//! comisión derivada en el momento de creación y fotos de check-in/check-out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del contrato
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContractStatus {
    Attivo,
    Concluso,
}

/// Lado del reportaje fotográfico del contrato
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    /// Puede quedar colgante: la comisión resulta 0 si el agente no existe
    pub agent_id: Uuid,
    pub client_id: Uuid,
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount: Decimal,
    /// Derivada al crear: total_amount * commission_rate / 100
    pub commission_amount: Decimal,
    pub status: ContractStatus,
    #[serde(default)]
    pub check_in_photos: Vec<String>,
    #[serde(default)]
    pub check_out_photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}
