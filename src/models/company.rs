//! Modelo de CompanyProfile
//!
//! Perfil singleton de la agencia: identidad legal/contacto y
//! credenciales opcionales de la centrale rischi. Se reemplaza
//! en bloque desde el formulario de ajustes.

use serde::{Deserialize, Serialize};

/// Credenciales opcionales del bureau de crédito externo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditBureauCredentials {
    pub provider: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub legal_name: String,
    pub vat_number: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_bureau: Option<CreditBureauCredentials>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            legal_name: "RentSync AI".to_string(),
            vat_number: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            bio: None,
            credit_bureau: None,
        }
    }
}
