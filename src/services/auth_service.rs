//! Shim de sesión/autenticación
//!
//! Dos transiciones desde anónimo: agencia (password cosmético contra la
//! configuración, vacío acepta todo) y agente (nickname case-insensitive,
//! solo con mandato Attivo). El magic link `?agent_ref=` reutiliza el mismo
//! lookup. No es una frontera de seguridad y se documenta como tal.

use crate::config::environment::EnvironmentConfig;
use crate::models::agent::AgentStatus;
use crate::models::session::UserSession;
use crate::store::domain_store::DomainStore;
use crate::utils::errors::{AppError, AppResult};

/// Login de agencia contra el password configurado
pub fn agency_login(config: &EnvironmentConfig, password: &str) -> AppResult<UserSession> {
    if !config.admin_password.is_empty() && password != config.admin_password {
        return Err(AppError::Unauthorized("Password non valida".to_string()));
    }
    log::info!("🔐 Sesión de agencia abierta");
    Ok(UserSession::agency("Agenzia"))
}

/// Login de agente por nickname (también el camino del magic link)
pub fn agent_login(store: &DomainStore, nickname: &str) -> AppResult<UserSession> {
    let agent = store
        .agent_by_nickname(nickname)
        .ok_or_else(|| AppError::Unauthorized("Agente non trovato".to_string()))?;

    if agent.status != AgentStatus::Attivo {
        return Err(AppError::Forbidden(
            "Mandato sospeso. Contattare l'agenzia.".to_string(),
        ));
    }

    log::info!("🔐 Sesión de agente abierta para '{}'", agent.nickname);
    Ok(UserSession::agent(agent.id, &agent.name))
}

/// Magic link compartible (payload del QR imprimible)
pub fn magic_link(config: &EnvironmentConfig, nickname: &str) -> String {
    format!(
        "{}/?agent_ref={}",
        config.public_base_url.trim_end_matches('/'),
        urlencoding::encode(nickname)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::Agent;
    use crate::models::session::UserRole;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn store_with_agent(nickname: &str, status: AgentStatus) -> DomainStore {
        let mut store = DomainStore::new();
        store.add_agent(Agent {
            id: Uuid::new_v4(),
            name: "Demo Agente".to_string(),
            nickname: nickname.to_string(),
            region: "Lazio".to_string(),
            commission_rate: Decimal::from(10),
            status,
            billing: None,
            created_at: Utc::now(),
        });
        store
    }

    #[test]
    fn magic_link_matches_nickname_case_insensitively() {
        let store = store_with_agent("demo", AgentStatus::Attivo);
        let session = agent_login(&store, "Demo").unwrap();
        assert_eq!(session.role, UserRole::Agent);
        assert!(session.user_id.is_some());
    }

    #[test]
    fn unknown_nickname_stays_unauthenticated() {
        let store = store_with_agent("demo", AgentStatus::Attivo);
        assert!(matches!(
            agent_login(&store, "ghost"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn suspended_agent_is_rejected_with_suspension_message() {
        let store = store_with_agent("demo", AgentStatus::Sospeso);
        match agent_login(&store, "demo") {
            Err(AppError::Forbidden(msg)) => assert!(msg.contains("sospeso")),
            Err(other) => panic!("Se esperaba Forbidden, se obtuvo {:?}", other),
            Ok(_) => panic!("Un agente suspendido no debe autenticarse"),
        }
    }

    #[test]
    fn empty_configured_password_accepts_anything() {
        let config = EnvironmentConfig::for_tests();
        assert!(agency_login(&config, "whatever").is_ok());
    }

    #[test]
    fn wrong_password_is_rejected_when_configured() {
        let mut config = EnvironmentConfig::for_tests();
        config.admin_password = "segreto".to_string();
        assert!(agency_login(&config, "sbagliato").is_err());
        assert!(agency_login(&config, "segreto").is_ok());
    }

    #[test]
    fn magic_link_url_encodes_the_nickname() {
        let config = EnvironmentConfig::for_tests();
        assert_eq!(
            magic_link(&config, "demo agente"),
            "https://rentsync.test/?agent_ref=demo%20agente"
        );
    }
}
