//! Modelo de DriverProfile
//!
//! Input transitorio del wizard de recomendación: se envía al gateway AI
//! y se descarta después de su uso, nunca se persiste en el store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfile {
    pub job: String,
    pub monthly_income: Decimal,
    pub annual_km: u32,
    pub family_size: u8,
    /// Ciudad, autopista, mixto...
    pub trip_type: String,
    pub transmission_preference: String,
    pub driving_style: String,
    pub load_needs: String,
    /// Lo que más pesa en la decisión: precio, confort, imagen...
    pub priority: String,
}
