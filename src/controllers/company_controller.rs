//! Controller del perfil de la agencia e informes

use validator::Validate;

use crate::dto::company_dto::{CompanyBioResponse, StrategicReportResponse, UpdateCompanyRequest};
use crate::dto::ApiResponse;
use crate::models::company::CompanyProfile;
use crate::services::GeminiService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct CompanyController {
    state: AppState,
}

impl CompanyController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn get(&self) -> CompanyProfile {
        self.state.store.read().await.company().clone()
    }

    /// Reemplazo en bloque (formulario de ajustes)
    pub async fn update(
        &self,
        request: UpdateCompanyRequest,
    ) -> AppResult<ApiResponse<CompanyProfile>> {
        request.validate()?;

        let profile = CompanyProfile {
            legal_name: request.legal_name,
            vat_number: request.vat_number,
            address: request.address,
            email: request.email,
            phone: request.phone,
            bio: request.bio,
            credit_bureau: request.credit_bureau,
        };

        self.state.store.write().await.set_company(profile.clone());

        Ok(ApiResponse::success_with_message(
            profile,
            "Perfil actualizado exitosamente".to_string(),
        ))
    }

    /// Bio AI: se guarda en el perfil además de devolverse
    pub async fn generate_bio(&self) -> AppResult<CompanyBioResponse> {
        let company = self.state.store.read().await.company().clone();

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        let bio = gemini.generate_company_bio(&company).await;

        self.state.store.write().await.set_company_bio(bio.clone());
        Ok(CompanyBioResponse { bio })
    }

    /// Informe estratégico AI sobre el estado del negocio
    pub async fn strategic_report(&self) -> AppResult<StrategicReportResponse> {
        let (fleet, clients_count, contracts) = {
            let store = self.state.store.read().await;
            (store.cars(), store.clients().len(), store.contracts())
        };

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        let report = gemini
            .generate_strategic_report(&fleet, clients_count, &contracts)
            .await;

        Ok(StrategicReportResponse { report })
    }
}
