//! Controller de clientes

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::client_dto::{
    AddDocumentRequest, CreateClientRequest, RiskAnalysisRequest, UpdateClientRequest,
};
use crate::dto::ApiResponse;
use crate::models::ai::RiskAnalysisResult;
use crate::models::client::{Client, ClientDocument, ClientStatus, ClientType, DEFAULT_RISK_SCORE};
use crate::services::GeminiService;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{validate_fiscal_code, validate_vat_number};

pub struct ClientController {
    state: AppState,
}

impl ClientController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// La partita IVA es obligatoria (y validada) para clientes Azienda
    fn check_vat(client_type: ClientType, vat_number: Option<&str>) -> AppResult<()> {
        if client_type == ClientType::Azienda {
            let vat = vat_number
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "La partita IVA è obbligatoria per i clienti Azienda".to_string(),
                    )
                })?;
            validate_vat_number(vat)
                .map_err(|_| AppError::BadRequest("Partita IVA non valida".to_string()))?;
        }
        Ok(())
    }

    /// El codice fiscale es opcional, pero si llega debe tener formato válido
    fn check_fiscal_code(fiscal_code: Option<&str>) -> AppResult<()> {
        if let Some(code) = fiscal_code.filter(|c| !c.trim().is_empty()) {
            validate_fiscal_code(code)
                .map_err(|_| AppError::BadRequest("Codice fiscale non valido".to_string()))?;
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateClientRequest) -> AppResult<ApiResponse<Client>> {
        request.validate()?;
        Self::check_vat(request.client_type, request.vat_number.as_deref())?;
        Self::check_fiscal_code(request.fiscal_code.as_deref())?;

        let client = Client {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            client_type: request.client_type,
            vat_number: request.vat_number,
            fiscal_code: request.fiscal_code,
            risk_score: DEFAULT_RISK_SCORE,
            status: ClientStatus::Attivo,
            documents: Vec::new(),
            rental_history: Vec::new(),
            subagent_id: request.subagent_id,
            created_at: Utc::now(),
        };

        self.state.store.write().await.add_client(client.clone());

        Ok(ApiResponse::success_with_message(
            client,
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Vec<Client> {
        self.state.store.read().await.clients()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        self.state
            .store
            .read()
            .await
            .client(id)
            .cloned()
            .ok_or_else(|| not_found_error("Cliente", &id.to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateClientRequest,
    ) -> AppResult<ApiResponse<Client>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let mut client = store
            .client(id)
            .cloned()
            .ok_or_else(|| not_found_error("Cliente", &id.to_string()))?;

        if let Some(name) = request.name {
            client.name = name;
        }
        if let Some(email) = request.email {
            client.email = email;
        }
        if let Some(phone) = request.phone {
            client.phone = phone;
        }
        if let Some(status) = request.status {
            client.status = status;
        }
        if let Some(vat_number) = request.vat_number {
            client.vat_number = Some(vat_number);
        }
        if let Some(fiscal_code) = request.fiscal_code {
            client.fiscal_code = Some(fiscal_code);
        }
        if let Some(subagent_id) = request.subagent_id {
            client.subagent_id = Some(subagent_id);
        }

        Self::check_vat(client.client_type, client.vat_number.as_deref())?;
        Self::check_fiscal_code(client.fiscal_code.as_deref())?;
        store.update_client(client.clone());

        Ok(ApiResponse::success_with_message(
            client,
            "Cliente actualizado exitosamente".to_string(),
        ))
    }

    /// Borrado con cascade a los contratos del cliente (según política)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store.write().await;
        if !store.delete_client(id) {
            return Err(not_found_error("Cliente", &id.to_string()));
        }
        Ok(())
    }

    /// Análisis de riesgo AI: el fallo es fatal para esta operación
    /// (se propaga, sin score fabricado); el éxito sobrescribe el
    /// risk_score del cliente.
    pub async fn analyze_risk(
        &self,
        id: Uuid,
        request: RiskAnalysisRequest,
    ) -> AppResult<RiskAnalysisResult> {
        request.validate()?;

        let client = {
            let store = self.state.store.read().await;
            store
                .client(id)
                .cloned()
                .ok_or_else(|| not_found_error("Cliente", &id.to_string()))?
        };

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        let result = gemini.analyze_risk(&client, &request.financials).await?;

        self.state
            .store
            .write()
            .await
            .set_client_risk_score(id, result.risk_score);

        log::info!(
            "📊 Risk score de '{}' actualizado a {} ({:?})",
            client.name,
            result.risk_score,
            result.risk_level
        );
        Ok(result)
    }

    /// Registro local del documento; nunca se sube a ningún sitio
    pub async fn add_document(
        &self,
        id: Uuid,
        request: AddDocumentRequest,
    ) -> AppResult<ApiResponse<()>> {
        request.validate()?;

        let document = ClientDocument {
            name: request.name,
            content: request.content,
            uploaded_at: Utc::now(),
        };

        let mut store = self.state.store.write().await;
        if !store.add_client_document(id, document) {
            return Err(not_found_error("Cliente", &id.to_string()));
        }

        Ok(ApiResponse::message_only(
            "Documento registrado exitosamente".to_string(),
        ))
    }
}
