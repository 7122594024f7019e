//! DTOs de contratos

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::contract::PhotoKind;

/// Request del flujo offerta/contrato
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub agent_id: Uuid,
    pub client_id: Uuid,
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount: Decimal,
}

/// Reemplazo de una de las dos listas de fotos
#[derive(Debug, Deserialize)]
pub struct UpdatePhotosRequest {
    pub kind: PhotoKind,
    pub photos: Vec<String>,
}

/// Detalles AI de una oferta
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    pub car_id: Uuid,

    #[validate(range(min = 1, max = 60))]
    pub months: u32,
}
