//! Controller de agentes (mandatos)

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::agent_dto::{
    ActivateMandateRequest, MagicLinkResponse, UpdateAgentRequest, UpdateAgentStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::agent::{Agent, AgentStatus, BillingInfo};
use crate::services::auth_service;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct AgentController {
    state: AppState,
}

impl AgentController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Activación de mandato: el nickname es el handle de login y debe
    /// ser único en el registro.
    pub async fn activate_mandate(
        &self,
        request: ActivateMandateRequest,
    ) -> AppResult<ApiResponse<Agent>> {
        request.validate()?;

        let agent = Agent {
            id: Uuid::new_v4(),
            name: request.name,
            nickname: request.nickname.trim().to_string(),
            region: request.region,
            commission_rate: request.commission_rate,
            status: AgentStatus::Attivo,
            billing: request.billing.map(|b| BillingInfo {
                iban: b.iban,
                vat_number: b.vat_number,
                bank_name: b.bank_name,
                payment_terms: b.payment_terms,
            }),
            created_at: Utc::now(),
        };

        let mut store = self.state.store.write().await;
        if !store.add_agent(agent.clone()) {
            return Err(conflict_error("Agente", "nickname", &agent.nickname));
        }

        Ok(ApiResponse::success_with_message(
            agent,
            "Mandato activado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Vec<Agent> {
        self.state.store.read().await.agents()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Agent> {
        self.state
            .store
            .read()
            .await
            .agent(id)
            .cloned()
            .ok_or_else(|| not_found_error("Agente", &id.to_string()))
    }

    /// Actualización del mandato (el nickname queda fijo)
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAgentRequest,
    ) -> AppResult<ApiResponse<Agent>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let mut agent = store
            .agent(id)
            .cloned()
            .ok_or_else(|| not_found_error("Agente", &id.to_string()))?;

        if let Some(name) = request.name {
            agent.name = name;
        }
        if let Some(region) = request.region {
            agent.region = region;
        }
        if let Some(rate) = request.commission_rate {
            agent.commission_rate = rate;
        }
        if let Some(b) = request.billing {
            agent.billing = Some(BillingInfo {
                iban: b.iban,
                vat_number: b.vat_number,
                bank_name: b.bank_name,
                payment_terms: b.payment_terms,
            });
        }

        store.update_agent(agent.clone());

        Ok(ApiResponse::success_with_message(
            agent,
            "Agente actualizado exitosamente".to_string(),
        ))
    }

    /// Suspender / reactivar el mandato. Un agente Sospeso no puede
    /// autenticarse ni por nickname ni por magic link.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateAgentStatusRequest,
    ) -> AppResult<Agent> {
        let mut store = self.state.store.write().await;
        if !store.set_agent_status(id, request.status) {
            return Err(not_found_error("Agente", &id.to_string()));
        }
        Ok(store.agent(id).cloned().expect("recién actualizado"))
    }

    /// Magic link compartible (payload del QR imprimible)
    pub async fn magic_link(&self, id: Uuid) -> AppResult<MagicLinkResponse> {
        let store = self.state.store.read().await;
        let agent = store
            .agent(id)
            .ok_or_else(|| not_found_error("Agente", &id.to_string()))?;

        Ok(MagicLinkResponse {
            url: auth_service::magic_link(&self.state.config, &agent.nickname),
            nickname: agent.nickname.clone(),
        })
    }
}
