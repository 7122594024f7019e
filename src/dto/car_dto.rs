//! DTOs de flota

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::car::{CarCategory, CarStatus, MonthlyRates};
use crate::models::driver::DriverProfile;

/// Request para crear un vehículo (opcionalmente prefilled por AI)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 5, max = 10))]
    pub plate: String,

    pub category: CarCategory,

    pub price_per_day: Decimal,

    #[validate(range(min = 1980, max = 2030))]
    pub year: i32,

    #[validate(range(min = 0))]
    pub mileage: i64,

    #[validate(length(min = 2, max = 30))]
    pub fuel_type: String,

    #[validate(length(min = 2, max = 30))]
    pub transmission: String,

    pub monthly_rates: Option<MonthlyRates>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub accessories: Vec<String>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 5, max = 10))]
    pub plate: Option<String>,

    pub category: Option<CarCategory>,
    pub price_per_day: Option<Decimal>,

    #[validate(range(min = 1980, max = 2030))]
    pub year: Option<i32>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub monthly_rates: Option<MonthlyRates>,
    pub features: Option<Vec<String>>,
    pub accessories: Option<Vec<String>>,
}

/// Sobrescritura directa del estado
#[derive(Debug, Deserialize)]
pub struct UpdateCarStatusRequest {
    pub status: CarStatus,
}

/// Wizard de recomendación: el perfil viaja entero al gateway AI
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub profile: DriverProfile,
}

/// Prefill AI de la ficha del vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CarDetailsPrefillRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,
}
