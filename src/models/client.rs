//! Modelo de Client
//!
//! Clientes de la agencia (privados o empresas) con score de riesgo
//! estimado por AI y documentación adjunta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tipo de cliente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientType {
    Privato,
    Azienda,
}

/// Estado del cliente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientStatus {
    Attivo,
    #[serde(rename = "In Revisione")]
    InRevisione,
    Bloccato,
}

/// Documento registrado localmente (payload base64 o blob-url, nunca se sube)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDocument {
    pub name: String,
    pub content: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Score de riesgo por defecto hasta que se ejecute el análisis AI
pub const DEFAULT_RISK_SCORE: u8 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub client_type: ClientType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_code: Option<String>,
    /// 0-100, por defecto 50; sobrescrito por el análisis de riesgo AI
    pub risk_score: u8,
    pub status: ClientStatus,
    #[serde(default)]
    pub documents: Vec<ClientDocument>,
    #[serde(default)]
    pub rental_history: Vec<String>,
    /// Referencia débil al agente que trajo al cliente
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subagent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
