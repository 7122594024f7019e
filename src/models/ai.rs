//! Resultados tipados del AI Gateway
//!
//! Formas de dominio que devuelve el gateway tras parsear la respuesta
//! del modelo generativo. Siempre se llega aquí a través de structs serde
//! con defaults, nunca por acceso a campos sin validar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nivel de riesgo coarse-grained
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Basso,
    Medio,
    Alto,
}

/// Resultado del análisis de riesgo de un cliente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAnalysisResult {
    /// 0-100
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    /// Techo de crédito sugerido
    pub credit_ceiling: Decimal,
    pub reasoning: String,
    pub recommendation: String,
}

/// Sugerencia de vehículo para un perfil de conductor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub car_id: Uuid,
    /// 0-100
    pub match_score: u8,
    pub reasoning: String,
    pub suggested_monthly_rate: Decimal,
    pub suggested_duration_months: u32,
}

/// Lead descubierto por la búsqueda AI con grounding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredLead {
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub interest: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Fuente de grounding citada por el modelo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Resultado de la búsqueda de leads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSearchResult {
    pub leads: Vec<DiscoveredLead>,
    pub sources: Vec<GroundingSource>,
}

/// Prefill AI para el formulario de alta de vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarDetailsSuggestion {
    pub category: String,
    pub price_per_day: Decimal,
    pub year: i32,
    pub fuel_type: String,
    pub transmission: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Detalles AI de una oferta de noleggio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDetails {
    pub monthly_rate: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub included_services: Vec<String>,
    #[serde(default)]
    pub notes: String,
}
