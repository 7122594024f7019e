//! Importación de leads por CSV pegado
//!
//! Un textarea con líneas `Nombre, Empresa, Interés, Ubicación`: un lead
//! por línea no vacía, tolerante con filas cortas. Empresa vacía cae al
//! nombre; interés vacío cae a un interés genérico de noleggio.

use chrono::Utc;
use uuid::Uuid;

use crate::models::lead::{LeadSource, LeadStatus, MarketingLead};

const DEFAULT_INTEREST: &str = "Noleggio a lungo termine";

/// Construir un lead aplicando los fallbacks de campo
pub fn lead_from_parts(
    name: &str,
    company: &str,
    interest: &str,
    location: Option<&str>,
    source: LeadSource,
) -> MarketingLead {
    let name = name.trim().to_string();
    let company = if company.trim().is_empty() {
        name.clone()
    } else {
        company.trim().to_string()
    };
    let interest = if interest.trim().is_empty() {
        DEFAULT_INTEREST.to_string()
    } else {
        interest.trim().to_string()
    };

    MarketingLead {
        id: Uuid::new_v4(),
        name,
        company,
        interest,
        status: LeadStatus::New,
        source,
        email: None,
        phone: None,
        location: location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from),
        created_at: Utc::now(),
    }
}

/// Parsear el texto pegado, un lead por línea no vacía
pub fn parse_lead_lines(text: &str) -> Vec<MarketingLead> {
    text.lines()
        .filter_map(|line| {
            if line.trim().is_empty() {
                return None;
            }
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            let name = parts.first().copied().unwrap_or_default();
            if name.is_empty() {
                log::warn!("⚠️ Línea de import sin nombre ignorada: '{}'", line);
                return None;
            }
            Some(lead_from_parts(
                name,
                parts.get(1).copied().unwrap_or_default(),
                parts.get(2).copied().unwrap_or_default(),
                parts.get(3).copied(),
                LeadSource::External,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_company_falls_back_to_the_name() {
        let text = "Mario Rossi, Rossi Srl, Furgone, Roma\nLuigi Verdi, , Auto Sportiva, Milano";
        let leads = parse_lead_lines(text);

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].company, "Rossi Srl");
        assert_eq!(leads[0].location.as_deref(), Some("Roma"));
        assert_eq!(leads[1].name, "Luigi Verdi");
        assert_eq!(leads[1].company, "Luigi Verdi");
    }

    #[test]
    fn short_rows_get_sensible_fallbacks() {
        let leads = parse_lead_lines("Anna Bianchi");
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].company, "Anna Bianchi");
        assert_eq!(leads[0].interest, DEFAULT_INTEREST);
        assert!(leads[0].location.is_none());
        assert_eq!(leads[0].source, LeadSource::External);
        assert_eq!(leads[0].status, LeadStatus::New);
    }

    #[test]
    fn blank_and_nameless_lines_are_skipped() {
        let text = "\n  \nMario Rossi, Rossi Srl\n, Senza Nome Srl\n";
        let leads = parse_lead_lines(text);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Mario Rossi");
    }
}
