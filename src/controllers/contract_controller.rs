//! Controller de contratos

use uuid::Uuid;
use validator::Validate;

use crate::dto::contract_dto::{CreateContractRequest, QuoteRequest, UpdatePhotosRequest};
use crate::dto::ApiResponse;
use crate::models::ai::QuoteDetails;
use crate::models::contract::Contract;
use crate::services::GeminiService;
use crate::state::AppState;
use crate::store::domain_store::NewContract;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct ContractController {
    state: AppState,
}

impl ContractController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Flujo offerta/contrato. Cliente y vehículo deben existir; el agente
    /// puede colgar (comisión 0, semántica observada del store).
    pub async fn create(&self, request: CreateContractRequest) -> AppResult<ApiResponse<Contract>> {
        request.validate()?;
        if request.end_date < request.start_date {
            return Err(AppError::BadRequest(
                "La data di fine precede quella di inizio".to_string(),
            ));
        }

        let mut store = self.state.store.write().await;
        if store.client(request.client_id).is_none() {
            return Err(not_found_error("Cliente", &request.client_id.to_string()));
        }
        if store.car(request.car_id).is_none() {
            return Err(not_found_error("Veicolo", &request.car_id.to_string()));
        }

        let contract = store.create_contract(NewContract {
            agent_id: request.agent_id,
            client_id: request.client_id,
            car_id: request.car_id,
            start_date: request.start_date,
            end_date: request.end_date,
            total_amount: request.total_amount,
        });

        Ok(ApiResponse::success_with_message(
            contract,
            "Contrato creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Vec<Contract> {
        self.state.store.read().await.contracts()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Contract> {
        self.state
            .store
            .read()
            .await
            .contract(id)
            .cloned()
            .ok_or_else(|| not_found_error("Contratto", &id.to_string()))
    }

    pub async fn update_photos(
        &self,
        id: Uuid,
        request: UpdatePhotosRequest,
    ) -> AppResult<Contract> {
        let mut store = self.state.store.write().await;
        if !store.update_contract_photos(id, request.kind, request.photos) {
            return Err(not_found_error("Contratto", &id.to_string()));
        }
        Ok(store.contract(id).cloned().expect("recién actualizado"))
    }

    /// Conclusión: estado Concluso y el vehículo vuelve a disponible
    pub async fn complete(&self, id: Uuid) -> AppResult<Contract> {
        let mut store = self.state.store.write().await;
        if !store.complete_contract(id) {
            return Err(not_found_error("Contratto", &id.to_string()));
        }
        Ok(store.contract(id).cloned().expect("recién concluido"))
    }

    /// Detalles AI de una oferta para un vehículo y duración
    pub async fn quote(&self, request: QuoteRequest) -> AppResult<QuoteDetails> {
        request.validate()?;

        let car = {
            let store = self.state.store.read().await;
            store
                .car(request.car_id)
                .cloned()
                .ok_or_else(|| not_found_error("Veicolo", &request.car_id.to_string()))?
        };

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        gemini.generate_quote_details(&car, request.months).await
    }
}
