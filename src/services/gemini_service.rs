//! Gateway hacia el servicio generativo de Gemini
//!
//! Wrapper stateless: construye el prompt desde los objetos de dominio,
//! invoca generateContent y coacciona el texto devuelto a un valor tipado.
//! El formato de salida del modelo no está garantizado por contrato, así
//! que cada respuesta se desenvuelve defensivamente: strip de fences
//! Markdown, parse serde con defaults y fallback por operación. Sin retry,
//! sin backoff, sin estado entre llamadas.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::environment::EnvironmentConfig;
use crate::models::ai::{
    AiRecommendation, CarDetailsSuggestion, DiscoveredLead, GroundingSource, LeadSearchResult,
    QuoteDetails, RiskAnalysisResult, RiskLevel,
};
use crate::models::car::Car;
use crate::models::client::Client as DomainClient;
use crate::models::company::CompanyProfile;
use crate::models::contract::Contract;
use crate::models::driver::DriverProfile;
use crate::utils::errors::{AppError, AppResult};

// ==================== Wire types (API Gemini) ====================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "googleSearch")]
    google_search: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(rename = "groundingMetadata", default)]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GeminiGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingChunk {
    #[serde(default)]
    web: Option<GeminiWebSource>,
}

#[derive(Debug, Deserialize)]
struct GeminiWebSource {
    #[serde(default)]
    title: String,
    #[serde(default)]
    uri: String,
}

// ==================== Formas intermedias tolerantes ====================

#[derive(Debug, Deserialize)]
struct RawRiskAnalysis {
    #[serde(default)]
    risk_score: f32,
    #[serde(default)]
    risk_level: String,
    #[serde(default)]
    credit_ceiling: Decimal,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    recommendation: String,
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    #[serde(default)]
    car_id: String,
    #[serde(default)]
    match_score: f32,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    suggested_monthly_rate: Decimal,
    #[serde(default = "default_duration")]
    suggested_duration_months: u32,
}

fn default_duration() -> u32 {
    12
}

// ==================== Helpers puros ====================

/// Quitar los fences Markdown (```json ... ```) que el modelo añade a veces
/// alrededor del JSON, antes de parsear.
pub fn clean_json_response(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    text = text.trim();
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim().to_string()
}

/// ¿Es la condición de cuota agotada del proveedor?
/// Se distingue del fallo genérico para que el cliente pueda reintentar
/// con una API key distinta.
fn is_quota_error(status: u16, body: &str) -> bool {
    status == 429 || body.contains("RESOURCE_EXHAUSTED") || body.contains("quota")
}

fn parse_risk_level(level: &str) -> RiskLevel {
    match level.trim().to_lowercase().as_str() {
        "basso" => RiskLevel::Basso,
        "alto" => RiskLevel::Alto,
        _ => RiskLevel::Medio,
    }
}

fn clamp_score(score: f32) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

/// Parsear el análisis de riesgo desde el texto crudo del modelo
fn parse_risk_analysis(raw: &str) -> AppResult<RiskAnalysisResult> {
    let cleaned = clean_json_response(raw);
    let parsed: RawRiskAnalysis = serde_json::from_str(&cleaned)
        .map_err(|e| AppError::ExternalApi(format!("Risk analysis JSON inválido: {}", e)))?;

    Ok(RiskAnalysisResult {
        risk_score: clamp_score(parsed.risk_score),
        risk_level: parse_risk_level(&parsed.risk_level),
        credit_ceiling: parsed.credit_ceiling,
        reasoning: parsed.reasoning,
        recommendation: parsed.recommendation,
    })
}

/// Parsear recomendaciones: ids desconocidos se descartan, máximo 3
fn parse_recommendations(raw: &str, fleet: &[Car]) -> Vec<AiRecommendation> {
    let cleaned = clean_json_response(raw);
    let parsed: Vec<RawRecommendation> = match serde_json::from_str(&cleaned) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("⚠️ Recomendaciones AI no parseables: {}", e);
            return Vec::new();
        }
    };

    parsed
        .into_iter()
        .filter_map(|r| {
            let car_id = r.car_id.parse().ok()?;
            fleet.iter().find(|c| c.id == car_id)?;
            Some(AiRecommendation {
                car_id,
                match_score: clamp_score(r.match_score),
                reasoning: r.reasoning,
                suggested_monthly_rate: r.suggested_monthly_rate,
                suggested_duration_months: r.suggested_duration_months,
            })
        })
        .take(3)
        .collect()
}

fn parse_discovered_leads(raw: &str) -> AppResult<Vec<DiscoveredLead>> {
    let cleaned = clean_json_response(raw);
    serde_json::from_str(&cleaned)
        .map_err(|e| AppError::ExternalApi(format!("Leads JSON inválido: {}", e)))
}

/// Orden de keys a intentar en la búsqueda de leads: una key explícita
/// del request manda sola; sin ella, la primaria y después las fallback
/// configuradas, en orden.
fn key_attempts<'a>(
    override_key: Option<&'a str>,
    primary: &'a str,
    fallbacks: &'a [String],
) -> Vec<&'a str> {
    match override_key {
        Some(key) => vec![key],
        None => std::iter::once(primary)
            .chain(fallbacks.iter().map(String::as_str))
            .collect(),
    }
}

// ==================== Servicio ====================

struct GenerateOutcome {
    text: String,
    sources: Vec<GroundingSource>,
}

pub struct GeminiService {
    api_key: String,
    fallback_api_keys: Vec<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiService {
    pub fn new(config: &EnvironmentConfig, client: Client) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            fallback_api_keys: config.gemini_fallback_api_keys.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            client,
        }
    }

    async fn generate(
        &self,
        prompt: String,
        json_mode: bool,
        grounded: bool,
        api_key_override: Option<&str>,
    ) -> AppResult<GenerateOutcome> {
        let api_key = api_key_override.unwrap_or(&self.api_key);
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(0.4),
                max_output_tokens: Some(2048),
                // El modo grounding no admite salida JSON forzada
                response_mime_type: if json_mode && !grounded {
                    Some("application/json".to_string())
                } else {
                    None
                },
            }),
            tools: if grounded {
                Some(vec![GeminiTool {
                    google_search: serde_json::json!({}),
                }])
            } else {
                None
            },
        };

        log::debug!(
            "🤖 Llamada Gemini ({}) json_mode={} grounded={}",
            self.model,
            json_mode,
            grounded
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error de red hacia Gemini: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error leyendo respuesta Gemini: {}", e)))?;

        if !status.is_success() {
            if is_quota_error(status.as_u16(), &body) {
                return Err(AppError::AiQuotaExceeded(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }
            return Err(AppError::ExternalApi(format!("HTTP {}: {}", status, body)));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::ExternalApi(format!("Respuesta Gemini inválida: {}", e)))?;

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("Respuesta sin candidatos".to_string()))?;

        let sources = candidate
            .grounding_metadata
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| GroundingSource {
                        title: web.title,
                        uri: web.uri,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::ExternalApi("Respuesta sin texto".to_string()));
        }

        Ok(GenerateOutcome { text, sources })
    }

    // ==================== Operaciones ====================

    /// Análisis de riesgo de un cliente. El fallo es fatal para la
    /// operación: el error se propaga, nunca se fabrica un score.
    pub async fn analyze_risk(
        &self,
        client: &DomainClient,
        financials: &str,
    ) -> AppResult<RiskAnalysisResult> {
        let prompt = format!(
            "Sei un analista del credito per un'agenzia di noleggio auto a lungo termine.\n\
             Valuta l'affidabilità creditizia del cliente e rispondi SOLO con JSON:\n\
             {{\"risk_score\": 0-100, \"risk_level\": \"Basso|Medio|Alto\", \
             \"credit_ceiling\": numero, \"reasoning\": \"...\", \"recommendation\": \"...\"}}\n\n\
             CLIENTE: {} ({:?}), email {}, P.IVA {}\n\
             DATI FINANZIARI DICHIARATI:\n{}",
            client.name,
            client.client_type,
            client.email,
            client.vat_number.as_deref().unwrap_or("n/d"),
            financials
        );

        let outcome = self.generate(prompt, true, false, None).await?;
        parse_risk_analysis(&outcome.text)
    }

    /// Hasta 3 sugerencias ordenadas para el perfil del conductor.
    /// Degradación no fatal: lista vacía ante cualquier fallo.
    pub async fn recommend_cars(
        &self,
        fleet: &[Car],
        profile: &DriverProfile,
    ) -> Vec<AiRecommendation> {
        if fleet.is_empty() {
            return Vec::new();
        }

        let fleet_listing: String = fleet
            .iter()
            .map(|c| {
                format!(
                    "- id: {} | {} {} | {:?} | {} €/giorno | {} | {}",
                    c.id, c.brand, c.model, c.category, c.price_per_day, c.fuel_type, c.transmission
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Sei un consulente di noleggio auto. Dato il profilo del guidatore, \
             scegli le auto più adatte dalla flotta disponibile (massimo 3, ordinate \
             per affinità). Rispondi SOLO con un array JSON di oggetti:\n\
             {{\"car_id\": \"uuid dalla lista\", \"match_score\": 0-100, \
             \"reasoning\": \"...\", \"suggested_monthly_rate\": numero, \
             \"suggested_duration_months\": 12|24|48}}\n\n\
             PROFILO: lavoro {}, reddito mensile {}, {} km/anno, famiglia di {}, \
             percorsi {}, cambio {}, guida {}, carico {}, priorità {}\n\n\
             FLOTTA DISPONIBILE:\n{}",
            profile.job,
            profile.monthly_income,
            profile.annual_km,
            profile.family_size,
            profile.trip_type,
            profile.transmission_preference,
            profile.driving_style,
            profile.load_needs,
            profile.priority,
            fleet_listing
        );

        match self.generate(prompt, true, false, None).await {
            Ok(outcome) => parse_recommendations(&outcome.text, fleet),
            Err(e) => {
                log::warn!("⚠️ Recomendación AI falló, degradando a vacío: {}", e);
                Vec::new()
            }
        }
    }

    /// Email de marketing listo para enviar. Placeholder de disculpa
    /// ante cualquier fallo (no fatal).
    pub async fn generate_marketing_copy(
        &self,
        lead_name: &str,
        interest: &str,
        tone: &str,
        offered_cars: &[Car],
        company: &CompanyProfile,
    ) -> String {
        let car_listing: String = offered_cars
            .iter()
            .map(|c| format!("- {} {} ({:?}, {} €/giorno)", c.brand, c.model, c.category, c.price_per_day))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Scrivi un'email commerciale in italiano, tono {}, da parte di {} \
             ({}, tel {}), indirizzata a {}. Interesse dichiarato: {}.\n\
             Proponi questi veicoli:\n{}\n\
             Rispondi solo con il corpo dell'email, senza oggetto.",
            tone, company.legal_name, company.email, company.phone, lead_name, interest, car_listing
        );

        match self.generate(prompt, false, false, None).await {
            Ok(outcome) => outcome.text.trim().to_string(),
            Err(e) => {
                log::warn!("⚠️ Copy AI falló, devolviendo placeholder: {}", e);
                "Ci scusiamo, non è stato possibile generare il testo in questo momento. \
                 Riprovare più tardi."
                    .to_string()
            }
        }
    }

    /// Búsqueda de leads con grounding. Ante cuota agotada se rotan las
    /// fallback keys configuradas; si todas se agotan, el error llega al
    /// cliente como AppError::AiQuotaExceeded para que aporte otra key.
    pub async fn find_leads(
        &self,
        target_segment: &str,
        location: &str,
        api_key_override: Option<&str>,
    ) -> AppResult<LeadSearchResult> {
        let prompt = format!(
            "Cerca sul web aziende o professionisti in zona {} potenzialmente \
             interessati al noleggio auto a lungo termine nel segmento: {}.\n\
             Rispondi SOLO con un array JSON di oggetti \
             {{\"name\": \"...\", \"company\": \"...\", \"interest\": \"...\", \
             \"location\": \"...\", \"email\": null, \"phone\": null}}, \
             senza testo fuori dal JSON.",
            location, target_segment
        );

        let attempts = key_attempts(api_key_override, &self.api_key, &self.fallback_api_keys);
        let total = attempts.len();
        let mut quota_error = None;

        for (i, key) in attempts.into_iter().enumerate() {
            match self.generate(prompt.clone(), false, true, Some(key)).await {
                Err(AppError::AiQuotaExceeded(msg)) => {
                    log::warn!("⚠️ Cuota agotada con la key {}/{}", i + 1, total);
                    quota_error = Some(AppError::AiQuotaExceeded(msg));
                }
                Err(other) => return Err(other),
                Ok(outcome) => {
                    let leads = parse_discovered_leads(&outcome.text)?;
                    return Ok(LeadSearchResult {
                        leads,
                        sources: outcome.sources,
                    });
                }
            }
        }

        Err(quota_error
            .unwrap_or_else(|| AppError::ExternalApi("Nessuna API key configurata".to_string())))
    }

    /// Prefill AI del formulario de alta de vehículo
    pub async fn generate_car_details(
        &self,
        brand: &str,
        model: &str,
    ) -> AppResult<CarDetailsSuggestion> {
        let prompt = format!(
            "Compila la scheda commerciale del veicolo {} {} per una flotta di \
             noleggio in Italia. Rispondi SOLO con JSON:\n\
             {{\"category\": \"Economy|SUV|Luxury|Van\", \"price_per_day\": numero, \
             \"year\": anno, \"fuel_type\": \"...\", \"transmission\": \"...\", \
             \"features\": [\"...\"]}}",
            brand, model
        );

        let outcome = self.generate(prompt, true, false, None).await?;
        let cleaned = clean_json_response(&outcome.text);
        serde_json::from_str(&cleaned)
            .map_err(|e| AppError::ExternalApi(format!("Scheda veicolo JSON inválido: {}", e)))
    }

    /// Detalles AI de una oferta de noleggio para un vehículo y duración
    pub async fn generate_quote_details(&self, car: &Car, months: u32) -> AppResult<QuoteDetails> {
        let listed_rate = car
            .monthly_rates
            .as_ref()
            .and_then(|rates| rates.for_duration(months));

        let prompt = format!(
            "Prepara i dettagli di un'offerta di noleggio a lungo termine per \
             {} {} ({:?}, {} €/giorno{}) su {} mesi. Rispondi SOLO con JSON:\n\
             {{\"monthly_rate\": numero, \"total_amount\": numero, \
             \"included_services\": [\"...\"], \"notes\": \"...\"}}",
            car.brand,
            car.model,
            car.category,
            car.price_per_day,
            listed_rate
                .map(|r| format!(", canone listino {} €/mese", r))
                .unwrap_or_default(),
            months
        );

        let outcome = self.generate(prompt, true, false, None).await?;
        let cleaned = clean_json_response(&outcome.text);
        serde_json::from_str(&cleaned)
            .map_err(|e| AppError::ExternalApi(format!("Offerta JSON inválido: {}", e)))
    }

    /// Informe estratégico sobre flota/clientes/contratos. Placeholder
    /// ante fallo (no fatal).
    pub async fn generate_strategic_report(
        &self,
        fleet: &[Car],
        clients_count: usize,
        contracts: &[Contract],
    ) -> String {
        let total_revenue: Decimal = contracts.iter().map(|c| c.total_amount).sum();
        let prompt = format!(
            "Sei il direttore commerciale di un'agenzia di noleggio. Scrivi un \
             breve report strategico in italiano (massimo 300 parole) su questi \
             numeri: {} veicoli in flotta, {} clienti, {} contratti per un \
             totale di {} €. Suggerisci le prossime azioni.",
            fleet.len(),
            clients_count,
            contracts.len(),
            total_revenue
        );

        match self.generate(prompt, false, false, None).await {
            Ok(outcome) => outcome.text.trim().to_string(),
            Err(e) => {
                log::warn!("⚠️ Report AI falló, devolviendo placeholder: {}", e);
                "Report non disponibile al momento.".to_string()
            }
        }
    }

    /// Bio de la empresa para material comercial. Placeholder ante fallo.
    pub async fn generate_company_bio(&self, company: &CompanyProfile) -> String {
        let prompt = format!(
            "Scrivi una breve presentazione aziendale in italiano (80-120 parole) \
             per {}, agenzia di noleggio auto con sede in {}.",
            company.legal_name, company.address
        );

        match self.generate(prompt, false, false, None).await {
            Ok(outcome) => outcome.text.trim().to_string(),
            Err(e) => {
                log::warn!("⚠️ Bio AI falló, devolviendo placeholder: {}", e);
                "Presentazione non disponibile al momento.".to_string()
            }
        }
    }
}
