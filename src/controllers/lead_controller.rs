//! Controller de leads de marketing

use uuid::Uuid;
use validator::Validate;

use crate::dto::lead_dto::{
    CreateLeadRequest, ImportLeadsRequest, ImportLeadsResponse, LeadSearchRequest,
    MarketingCopyRequest, MarketingCopyResponse, UpdateLeadRequest, UpdateLeadStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::ai::LeadSearchResult;
use crate::models::lead::{LeadSource, MarketingLead};
use crate::services::lead_import_service::{lead_from_parts, parse_lead_lines};
use crate::services::GeminiService;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct LeadController {
    state: AppState,
}

impl LeadController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn create(&self, request: CreateLeadRequest) -> AppResult<ApiResponse<MarketingLead>> {
        request.validate()?;

        let mut lead = lead_from_parts(
            &request.name,
            &request.company,
            &request.interest,
            request.location.as_deref(),
            LeadSource::Manual,
        );
        lead.email = request.email;
        lead.phone = request.phone;

        self.state.store.write().await.add_lead(lead.clone());

        Ok(ApiResponse::success_with_message(
            lead,
            "Lead creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Vec<MarketingLead> {
        self.state.store.read().await.leads()
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateLeadRequest,
    ) -> AppResult<ApiResponse<MarketingLead>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let mut lead = store
            .lead(id)
            .cloned()
            .ok_or_else(|| not_found_error("Lead", &id.to_string()))?;

        if let Some(name) = request.name {
            lead.name = name;
        }
        if let Some(company) = request.company {
            lead.company = company;
        }
        if let Some(interest) = request.interest {
            lead.interest = interest;
        }
        if let Some(email) = request.email {
            lead.email = Some(email);
        }
        if let Some(phone) = request.phone {
            lead.phone = Some(phone);
        }
        if let Some(location) = request.location {
            lead.location = Some(location);
        }

        store.update_lead(lead.clone());

        Ok(ApiResponse::success_with_message(
            lead,
            "Lead actualizado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateLeadStatusRequest,
    ) -> AppResult<MarketingLead> {
        let mut store = self.state.store.write().await;
        if !store.update_lead_status(id, request.status) {
            return Err(not_found_error("Lead", &id.to_string()));
        }
        Ok(store.lead(id).cloned().expect("recién actualizado"))
    }

    /// Import del textarea CSV: un lead por línea no vacía
    pub async fn import(&self, request: ImportLeadsRequest) -> AppResult<ImportLeadsResponse> {
        request.validate()?;

        let leads = parse_lead_lines(&request.text);
        let imported = leads.len();
        self.state.store.write().await.add_leads(leads.clone());

        log::info!("📥 Import CSV: {} leads registrados", imported);
        Ok(ImportLeadsResponse { imported, leads })
    }

    /// Búsqueda AI con grounding. La cuota agotada llega al cliente como
    /// AI_QUOTA_EXCEEDED para que pruebe otra key; los leads encontrados
    /// se registran con source AI_Search.
    pub async fn search(&self, request: LeadSearchRequest) -> AppResult<LeadSearchResult> {
        request.validate()?;

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        let result = gemini
            .find_leads(
                &request.target_segment,
                &request.location,
                request.api_key.as_deref(),
            )
            .await?;

        let mut store = self.state.store.write().await;
        for discovered in &result.leads {
            let mut lead = lead_from_parts(
                &discovered.name,
                &discovered.company,
                &discovered.interest,
                discovered.location.as_deref(),
                LeadSource::AiSearch,
            );
            lead.email = discovered.email.clone();
            lead.phone = discovered.phone.clone();
            store.add_lead(lead);
        }

        log::info!(
            "🔎 Búsqueda AI: {} leads, {} fuentes",
            result.leads.len(),
            result.sources.len()
        );
        Ok(result)
    }

    /// Email AI para un lead, proponiendo vehículos concretos de la flota
    pub async fn marketing_copy(
        &self,
        id: Uuid,
        request: MarketingCopyRequest,
    ) -> AppResult<MarketingCopyResponse> {
        request.validate()?;

        let (lead, cars, company) = {
            let store = self.state.store.read().await;
            let lead = store
                .lead(id)
                .cloned()
                .ok_or_else(|| not_found_error("Lead", &id.to_string()))?;
            let cars: Vec<_> = request
                .car_ids
                .iter()
                .filter_map(|car_id| store.car(*car_id).cloned())
                .collect();
            (lead, cars, store.company().clone())
        };

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        let body = gemini
            .generate_marketing_copy(&lead.name, &lead.interest, &request.tone, &cars, &company)
            .await;

        Ok(MarketingCopyResponse { body })
    }
}
