//! Controller de autenticación
//!
//! Transiciones del shim de sesión: agencia por password cosmético,
//! agente por nickname o magic link, logout por token.

use crate::dto::auth_dto::{
    AgencyLoginRequest, AgentLoginRequest, LogoutRequest, SessionResponse,
};
use crate::dto::ApiResponse;
use crate::services::auth_service;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn agency_login(&self, request: AgencyLoginRequest) -> AppResult<SessionResponse> {
        let session = auth_service::agency_login(&self.state.config, &request.password)?;
        let response = SessionResponse::from(&session);
        self.state.store_session(session).await;
        Ok(response)
    }

    pub async fn agent_login(&self, request: AgentLoginRequest) -> AppResult<SessionResponse> {
        let session = {
            let store = self.state.store.read().await;
            auth_service::agent_login(&store, &request.nickname)?
        };
        let response = SessionResponse::from(&session);
        self.state.store_session(session).await;
        Ok(response)
    }

    /// Camino del magic link: mismo lookup que el login de agente,
    /// disparado por el query param `agent_ref`.
    pub async fn magic_link_login(&self, agent_ref: &str) -> AppResult<SessionResponse> {
        self.agent_login(AgentLoginRequest {
            nickname: agent_ref.to_string(),
        })
        .await
    }

    pub async fn logout(&self, request: LogoutRequest) -> ApiResponse<()> {
        if self.state.remove_session(&request.token).await {
            ApiResponse::message_only("Sessione chiusa".to_string())
        } else {
            ApiResponse::message_only("Sessione non trovata".to_string())
        }
    }
}
