//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// Password de la agencia. Vacío = acceso libre (gate cosmético).
    pub admin_password: String,
    /// Base URL pública para construir magic links compartibles
    pub public_base_url: String,
    // Gemini
    pub gemini_api_key: String,
    pub gemini_fallback_api_keys: Vec<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let host = env::var("HOST").expect("HOST must be set");
        let port: u16 = env::var("PORT")
            .expect("PORT must be set")
            .parse()
            .expect("PORT must be a valid number");

        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_default(),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("https://{}:{}", host, port)),
            gemini_api_key: env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set"),
            gemini_fallback_api_keys: env::var("GEMINI_FALLBACK_API_KEYS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta/models".to_string()
            }),
            host,
            port,
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuración mínima para tests (sin leer el entorno)
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            cors_origins: Vec::new(),
            admin_password: String::new(),
            public_base_url: "https://rentsync.test".to_string(),
            gemini_api_key: "test-key".to_string(),
            gemini_fallback_api_keys: Vec::new(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "http://127.0.0.1:0".to_string(),
        }
    }
}
