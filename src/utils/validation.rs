//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! del dominio italiano (targhe, partita IVA, codice fiscale).

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Targa italiana moderna: AA999AA
    static ref RE_PLATE: Regex = Regex::new(r"^[A-Z]{2}[0-9]{3}[A-Z]{2}$").unwrap();
    /// Partita IVA: 11 dígitos
    static ref RE_VAT: Regex = Regex::new(r"^[0-9]{11}$").unwrap();
    /// Codice fiscale: 16 alfanuméricos
    static ref RE_FISCAL_CODE: Regex = Regex::new(r"^[A-Z0-9]{16}$").unwrap();
}

/// Normalizar una targa para comparación (mayúsculas, sin espacios)
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().replace(' ', "").to_uppercase()
}

/// Validar formato de targa italiana
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    let normalized = normalize_plate(value);
    if !RE_PLATE.is_match(&normalized) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar partita IVA (obligatoria para clientes Azienda)
pub fn validate_vat_number(value: &str) -> Result<(), ValidationError> {
    if !RE_VAT.is_match(value.trim()) {
        let mut error = ValidationError::new("vat_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar codice fiscale
pub fn validate_fiscal_code(value: &str) -> Result<(), ValidationError> {
    if !RE_FISCAL_CODE.is_match(value.trim().to_uppercase().as_str()) {
        let mut error = ValidationError::new("fiscal_code");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_plate_with_spaces_and_lowercase() {
        assert!(validate_plate("ab 123 cd").is_ok());
        assert_eq!(normalize_plate("ab 123 cd"), "AB123CD");
    }

    #[test]
    fn rejects_malformed_plate() {
        assert!(validate_plate("1234567").is_err());
        assert!(validate_plate("").is_err());
    }

    #[test]
    fn vat_number_must_be_eleven_digits() {
        assert!(validate_vat_number("12345678901").is_ok());
        assert!(validate_vat_number("1234567890").is_err());
        assert!(validate_vat_number("1234567890a").is_err());
    }

    #[test]
    fn fiscal_code_is_sixteen_alphanumerics() {
        assert!(validate_fiscal_code("RSSMRA80A01H501U").is_ok());
        assert!(validate_fiscal_code("short").is_err());
    }
}
