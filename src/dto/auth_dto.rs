//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::session::{UserRole, UserSession};

/// Login de agencia
#[derive(Debug, Deserialize)]
pub struct AgencyLoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Login de agente por nickname
#[derive(Debug, Deserialize)]
pub struct AgentLoginRequest {
    pub nickname: String,
}

/// Query del magic link: ?agent_ref=<nickname>
#[derive(Debug, Deserialize)]
pub struct MagicLinkQuery {
    pub agent_ref: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub name: String,
}

impl From<&UserSession> for SessionResponse {
    fn from(session: &UserSession) -> Self {
        Self {
            token: session.token.clone(),
            role: session.role,
            user_id: session.user_id,
            name: session.name.clone(),
        }
    }
}
