//! DTOs del perfil de la agencia

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::company::CreditBureauCredentials;

/// Reemplazo en bloque del perfil (formulario de ajustes)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 2, max = 200))]
    pub legal_name: String,

    #[validate(length(min = 11, max = 11))]
    pub vat_number: String,

    #[validate(length(min = 2, max = 300))]
    pub address: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 5, max = 30))]
    pub phone: String,

    pub bio: Option<String>,

    pub credit_bureau: Option<CreditBureauCredentials>,
}

#[derive(Debug, Serialize)]
pub struct CompanyBioResponse {
    pub bio: String,
}

#[derive(Debug, Serialize)]
pub struct StrategicReportResponse {
    pub report: String,
}
