//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El estado de negocio vive solo en memoria:
//! un reinicio del proceso descarta flota, clientes, agentes y contratos.

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::models::session::UserSession;
use crate::store::domain_store::DomainStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DomainStore>>,
    pub sessions: Arc<RwLock<HashMap<String, UserSession>>>,
    pub config: EnvironmentConfig,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            store: Arc::new(RwLock::new(DomainStore::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
            http_client,
        }
    }

    /// Almacenar una sesión activa
    pub async fn store_session(&self, session: UserSession) {
        log::info!(
            "💾 Almacenando sesión '{}' para '{}' (rol {:?})",
            session.token,
            session.name,
            session.role
        );
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session);
    }

    /// Obtener una sesión por token
    pub async fn get_session(&self, token: &str) -> Option<UserSession> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Eliminar una sesión (logout)
    pub async fn remove_session(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token).is_some();
        if removed {
            log::info!("🔓 Sesión '{}' cerrada", token);
        } else {
            log::warn!("❌ Sesión '{}' no encontrada en logout", token);
        }
        removed
    }
}
