//! Modelo de MarketingLead
//!
//! Leads de marketing: creados a mano, importados por CSV pegado
//! o descubiertos por la búsqueda AI con grounding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del lead en el pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
}

/// Origen del lead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadSource {
    Manual,
    #[serde(rename = "AI_Search")]
    AiSearch,
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingLead {
    pub id: Uuid,
    pub name: String,
    pub company: String,
    /// Interés declarado, posiblemente redactado por AI
    pub interest: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}
