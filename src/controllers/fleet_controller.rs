//! Controller de flota

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{
    CarDetailsPrefillRequest, CreateCarRequest, RecommendationRequest, UpdateCarRequest,
    UpdateCarStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::ai::{AiRecommendation, CarDetailsSuggestion};
use crate::models::car::{Car, CarStatus};
use crate::services::GeminiService;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};
use crate::utils::validation::{normalize_plate, validate_plate};

pub struct FleetController {
    state: AppState,
}

impl FleetController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn create(&self, request: CreateCarRequest) -> AppResult<ApiResponse<Car>> {
        request.validate()?;
        validate_plate(&request.plate)
            .map_err(|_| AppError::BadRequest("Targa non valida".to_string()))?;

        let car = Car {
            id: Uuid::new_v4(),
            brand: request.brand,
            model: request.model,
            plate: normalize_plate(&request.plate),
            category: request.category,
            price_per_day: request.price_per_day,
            status: CarStatus::Available,
            year: request.year,
            mileage: request.mileage,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            monthly_rates: request.monthly_rates,
            features: request.features,
            accessories: request.accessories,
            created_at: Utc::now(),
        };

        let mut store = self.state.store.write().await;
        if !store.add_car(car.clone()) {
            return Err(conflict_error("Veicolo", "targa", &car.plate));
        }

        Ok(ApiResponse::success_with_message(
            car,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Vec<Car> {
        self.state.store.read().await.cars()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Car> {
        self.state
            .store
            .read()
            .await
            .car(id)
            .cloned()
            .ok_or_else(|| not_found_error("Veicolo", &id.to_string()))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCarRequest) -> AppResult<ApiResponse<Car>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let mut car = store
            .car(id)
            .cloned()
            .ok_or_else(|| not_found_error("Veicolo", &id.to_string()))?;

        if let Some(plate) = request.plate {
            validate_plate(&plate)
                .map_err(|_| AppError::BadRequest("Targa non valida".to_string()))?;
            let normalized = normalize_plate(&plate);
            if store.plate_exists(&normalized, Some(id)) {
                return Err(conflict_error("Veicolo", "targa", &normalized));
            }
            car.plate = normalized;
        }
        if let Some(brand) = request.brand {
            car.brand = brand;
        }
        if let Some(model) = request.model {
            car.model = model;
        }
        if let Some(category) = request.category {
            car.category = category;
        }
        if let Some(price) = request.price_per_day {
            car.price_per_day = price;
        }
        if let Some(year) = request.year {
            car.year = year;
        }
        if let Some(mileage) = request.mileage {
            car.mileage = mileage;
        }
        if let Some(fuel_type) = request.fuel_type {
            car.fuel_type = fuel_type;
        }
        if let Some(transmission) = request.transmission {
            car.transmission = transmission;
        }
        if let Some(rates) = request.monthly_rates {
            car.monthly_rates = Some(rates);
        }
        if let Some(features) = request.features {
            car.features = features;
        }
        if let Some(accessories) = request.accessories {
            car.accessories = accessories;
        }

        store.update_car(car.clone());

        Ok(ApiResponse::success_with_message(
            car,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store.write().await;
        if !store.delete_car(id) {
            return Err(not_found_error("Veicolo", &id.to_string()));
        }
        Ok(())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateCarStatusRequest,
    ) -> AppResult<Car> {
        let mut store = self.state.store.write().await;
        if !store.update_car_status(id, request.status) {
            return Err(not_found_error("Veicolo", &id.to_string()));
        }
        Ok(store.car(id).cloned().expect("recién actualizado"))
    }

    pub async fn cycle_status(&self, id: Uuid) -> AppResult<Car> {
        let mut store = self.state.store.write().await;
        store
            .cycle_car_status(id)
            .ok_or_else(|| not_found_error("Veicolo", &id.to_string()))?;
        Ok(store.car(id).cloned().expect("recién ciclado"))
    }

    /// Wizard de recomendación: la flota disponible + perfil viajan al
    /// gateway; degradación a lista vacía si el AI falla.
    pub async fn recommend(&self, request: RecommendationRequest) -> Vec<AiRecommendation> {
        let fleet = {
            let store = self.state.store.read().await;
            store.available_cars()
        };

        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        gemini.recommend_cars(&fleet, &request.profile).await
    }

    /// Prefill AI del formulario de alta
    pub async fn car_details(
        &self,
        request: CarDetailsPrefillRequest,
    ) -> AppResult<CarDetailsSuggestion> {
        request.validate()?;
        let gemini = GeminiService::new(&self.state.config, self.state.http_client.clone());
        gemini.generate_car_details(&request.brand, &request.model).await
    }
}
