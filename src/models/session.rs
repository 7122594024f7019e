//! Modelo de UserSession
//!
//! Sesiones transitorias (agencia o agente). Viven solo en el registro
//! en memoria del AppState; no hay expiración ni verificación server-side
//! más allá del lookup por token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rol de la sesión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Agency,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Token opaco (uuid v4), clave del registro de sesiones
    pub token: String,
    pub role: UserRole,
    /// Id del agente cuando role == Agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    pub fn agency(name: &str) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            role: UserRole::Agency,
            user_id: None,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn agent(agent_id: Uuid, name: &str) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            role: UserRole::Agent,
            user_id: Some(agent_id),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}
