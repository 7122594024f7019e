//! Modelo de Car
//!
//! Vehículos de la flota, con estado de alquiler y tarifario
//! mensual opcional para el noleggio a lungo termine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categoría comercial del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarCategory {
    Economy,
    #[serde(rename = "SUV")]
    Suv,
    Luxury,
    Van,
}

/// Estado del vehículo en la flota
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
}

impl CarStatus {
    /// Ciclo manual del estado: Available → Rented → Maintenance → Available
    pub fn next(self) -> CarStatus {
        match self {
            CarStatus::Available => CarStatus::Rented,
            CarStatus::Rented => CarStatus::Maintenance,
            CarStatus::Maintenance => CarStatus::Available,
        }
    }
}

/// Tarifario mensual opcional (canone por duración del contrato)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRates {
    #[serde(rename = "1", skip_serializing_if = "Option::is_none")]
    pub months_1: Option<Decimal>,
    #[serde(rename = "3", skip_serializing_if = "Option::is_none")]
    pub months_3: Option<Decimal>,
    #[serde(rename = "6", skip_serializing_if = "Option::is_none")]
    pub months_6: Option<Decimal>,
    #[serde(rename = "12", skip_serializing_if = "Option::is_none")]
    pub months_12: Option<Decimal>,
    #[serde(rename = "24", skip_serializing_if = "Option::is_none")]
    pub months_24: Option<Decimal>,
    #[serde(rename = "48", skip_serializing_if = "Option::is_none")]
    pub months_48: Option<Decimal>,
}

impl MonthlyRates {
    /// Tarifa para la duración pedida, si está definida
    pub fn for_duration(&self, months: u32) -> Option<Decimal> {
        match months {
            1 => self.months_1,
            3 => self.months_3,
            6 => self.months_6,
            12 => self.months_12,
            24 => self.months_24,
            48 => self.months_48,
            _ => None,
        }
    }
}

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    /// Targa, única dentro de la flota (normalizada en mayúsculas)
    pub plate: String,
    pub category: CarCategory,
    pub price_per_day: Decimal,
    pub status: CarStatus,
    pub year: i32,
    pub mileage: i64,
    pub fuel_type: String,
    pub transmission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rates: Option<MonthlyRates>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    pub created_at: DateTime<Utc>,
}
