//! Tests de integración de la API
//!
//! Se construye el router real con un estado en memoria y se disparan
//! requests con tower::oneshot. Los endpoints que llaman al gateway AI
//! no se ejercitan aquí (requieren red).

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use rentsync_backend::config::environment::EnvironmentConfig;
use rentsync_backend::routes::build_router;
use rentsync_backend::state::AppState;

fn test_app() -> Router {
    build_router(AppState::new(EnvironmentConfig::for_tests()))
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn sample_car(plate: &str) -> Value {
    json!({
        "brand": "Fiat",
        "model": "Panda",
        "plate": plate,
        "category": "Economy",
        "price_per_day": "35.00",
        "year": 2022,
        "mileage": 15000,
        "fuel_type": "Benzina",
        "transmission": "Manuale"
    })
}

fn sample_agent(nickname: &str) -> Value {
    json!({
        "name": "Marco Bianchi",
        "nickname": nickname,
        "region": "Lombardia",
        "commission_rate": "10"
    })
}

fn sample_client(name: &str) -> Value {
    json!({
        "name": name,
        "email": "cliente@example.com",
        "phone": "+39 333 1234567",
        "type": "Privato"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send_empty(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "rentsync-backend");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_fleet_crud_and_status_cycle() {
    let app = test_app();

    let (status, body) = send_json(&app, "POST", "/api/fleet", sample_car("AB123CD")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "Available");
    let car_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_empty(&app, "GET", &format!("/api/fleet/{car_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plate"], "AB123CD");

    // Ciclo manual: Available → Rented → Maintenance → Available
    let (_, body) = send_empty(&app, "POST", &format!("/api/fleet/{car_id}/cycle-status")).await;
    assert_eq!(body["status"], "Rented");
    let (_, body) = send_empty(&app, "POST", &format!("/api/fleet/{car_id}/cycle-status")).await;
    assert_eq!(body["status"], "Maintenance");
    let (_, body) = send_empty(&app, "POST", &format!("/api/fleet/{car_id}/cycle-status")).await;
    assert_eq!(body["status"], "Available");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/fleet/{car_id}"),
        json!({ "mileage": 18000 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mileage"], 18000);
    assert_eq!(body["data"]["brand"], "Fiat");

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/fleet/{car_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_empty(&app, "GET", &format!("/api/fleet/{car_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_plate_is_rejected() {
    let app = test_app();

    let (status, _) = send_json(&app, "POST", "/api/fleet", sample_car("ZZ999ZZ")).await;
    assert_eq!(status, StatusCode::OK);

    // La targa se normaliza a mayúsculas antes de chequear unicidad
    let (status, body) = send_json(&app, "POST", "/api/fleet", sample_car("zz999zz")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn test_agency_login_accepts_any_password_when_unset() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({ "password": "qualsiasi" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "agency");
    assert!(body["token"].as_str().unwrap().len() > 10);
}

#[tokio::test]
async fn test_magic_link_login_is_case_insensitive() {
    let app = test_app();

    let (status, body) = send_json(&app, "POST", "/api/agents", sample_agent("marco")).await;
    assert_eq!(status, StatusCode::OK);
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_empty(&app, "GET", "/api/auth/magic-link?agent_ref=MARCO").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "agent");
    assert_eq!(body["user_id"], agent_id.as_str());
    assert_eq!(body["name"], "Marco Bianchi");
}

#[tokio::test]
async fn test_magic_link_login_unknown_agent_is_unauthorized() {
    let app = test_app();

    let (status, body) = send_empty(&app, "GET", "/api/auth/magic-link?agent_ref=fantasma").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_magic_link_login_suspended_agent_is_forbidden() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/agents", sample_agent("sospeso")).await;
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/agents/{agent_id}/status"),
        json!({ "status": "Sospeso" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_empty(&app, "GET", "/api/auth/magic-link?agent_ref=sospeso").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Mandato sospeso. Contattare l'agenzia.");
}

#[tokio::test]
async fn test_magic_link_url_contains_agent_ref() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/agents", sample_agent("laura.v")).await;
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) =
        send_empty(&app, "GET", &format!("/api/agents/{agent_id}/magic-link")).await;
    assert_eq!(status, StatusCode::OK);

    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://rentsync.test"));
    assert!(url.contains("agent_ref=laura.v"));
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/auth/login", json!({})).await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) =
        send_json(&app, "POST", "/api/auth/logout", json!({ "token": token })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_lead_import_from_pasted_text() {
    let app = test_app();

    let text = "Mario Rossi, Rossi SRL, SUV lungo termine, Milano\n\nLuigi Verdi";
    let (status, body) = send_json(&app, "POST", "/api/leads/import", json!({ "text": text })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 2);
    assert_eq!(body["leads"][0]["company"], "Rossi SRL");
    // Sin empresa, el nombre hace de empresa
    assert_eq!(body["leads"][1]["company"], "Luigi Verdi");
    assert_eq!(body["leads"][1]["source"], "External");

    let (_, body) = send_empty(&app, "GET", "/api/leads").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_lead_status_transition() {
    let app = test_app();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/leads",
        json!({ "name": "Anna Bianchi", "interest": "SUV" }),
    )
    .await;
    let lead_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "New");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/leads/{lead_id}/status"),
        json!({ "status": "Contacted" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Contacted");

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/leads/{}/status", uuid::Uuid::new_v4()),
        json!({ "status": "Converted" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lead_update_replaces_fields() {
    let app = test_app();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/leads",
        json!({ "name": "Carlo Neri" }),
    )
    .await;
    let lead_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/leads/{lead_id}"),
        json!({ "interest": "Furgoni", "location": "Torino" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["interest"], "Furgoni");
    assert_eq!(body["data"]["location"], "Torino");
    assert_eq!(body["data"]["name"], "Carlo Neri");
}

#[tokio::test]
async fn test_agent_update_changes_commission_for_new_contracts() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/agents", sample_agent("rosa")).await;
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/agents/{agent_id}"),
        json!({ "region": "Piemonte", "commission_rate": "20" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["region"], "Piemonte");
    // El nickname no se toca: los magic links emitidos siguen valiendo
    assert_eq!(body["data"]["nickname"], "rosa");

    let (_, body) = send_json(&app, "POST", "/api/fleet", sample_car("II000II")).await;
    let car_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = send_json(&app, "POST", "/api/clients", sample_client("Piero Blu")).await;
    let client_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/contracts",
        json!({
            "agent_id": agent_id,
            "client_id": client_id,
            "car_id": car_id,
            "start_date": "2026-09-01",
            "end_date": "2026-10-01",
            "total_amount": "1000.00"
        }),
    )
    .await;
    // 20% tras la actualización del mandato
    assert_eq!(body["data"]["commission_amount"], "200.00");
}

#[tokio::test]
async fn test_malformed_fiscal_code_is_rejected() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/clients",
        json!({
            "name": "Mario Rossi",
            "email": "mario@example.com",
            "phone": "+39 333 1234567",
            "type": "Privato",
            "fiscal_code": "troppo-corto"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Codice fiscale non valido");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/clients",
        json!({
            "name": "Mario Rossi",
            "email": "mario@example.com",
            "phone": "+39 333 1234567",
            "type": "Privato",
            "fiscal_code": "RSSMRA80A01H501U"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_company_client_requires_vat_number() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/clients",
        json!({
            "name": "ACME SpA",
            "email": "acme@example.com",
            "phone": "+39 02 555000",
            "type": "Azienda"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_client_delete_cascades_contracts() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/fleet", sample_car("CC321DD")).await;
    let car_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(&app, "POST", "/api/agents", sample_agent("giulia")).await;
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(&app, "POST", "/api/clients", sample_client("Mario Rossi")).await;
    let client_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/contracts",
        json!({
            "agent_id": agent_id,
            "client_id": client_id,
            "car_id": car_id,
            "start_date": "2026-09-01",
            "end_date": "2026-12-01",
            "total_amount": "3000.00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 10% de comisión sobre 3000
    assert_eq!(body["data"]["commission_amount"], "300.00");

    // El coche pasa a Rented al firmar
    let (_, body) = send_empty(&app, "GET", &format!("/api/fleet/{car_id}")).await;
    assert_eq!(body["status"], "Rented");

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/clients/{client_id}")).await;
    assert_eq!(status, StatusCode::OK);

    // El contrato se fue con el cliente; el coche sigue en la flota
    let (_, body) = send_empty(&app, "GET", "/api/contracts").await;
    assert_eq!(body.as_array().unwrap().len(), 0);
    let (status, _) = send_empty(&app, "GET", &format!("/api/fleet/{car_id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_contract_complete_frees_the_car() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/fleet", sample_car("EE456FF")).await;
    let car_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = send_json(&app, "POST", "/api/agents", sample_agent("paolo")).await;
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = send_json(&app, "POST", "/api/clients", sample_client("Anna Neri")).await;
    let client_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/contracts",
        json!({
            "agent_id": agent_id,
            "client_id": client_id,
            "car_id": car_id,
            "start_date": "2026-09-01",
            "end_date": "2026-10-01",
            "total_amount": "900.00"
        }),
    )
    .await;
    let contract_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) =
        send_empty(&app, "POST", &format!("/api/contracts/{contract_id}/complete")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Concluso");

    let (_, body) = send_empty(&app, "GET", &format!("/api/fleet/{car_id}")).await;
    assert_eq!(body["status"], "Available");
}

#[tokio::test]
async fn test_contract_photos_replace_by_kind() {
    let app = test_app();

    let (_, body) = send_json(&app, "POST", "/api/fleet", sample_car("GG789HH")).await;
    let car_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = send_json(&app, "POST", "/api/agents", sample_agent("franco")).await;
    let agent_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = send_json(&app, "POST", "/api/clients", sample_client("Elena Blu")).await;
    let client_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/contracts",
        json!({
            "agent_id": agent_id,
            "client_id": client_id,
            "car_id": car_id,
            "start_date": "2026-09-01",
            "end_date": "2026-10-01",
            "total_amount": "500.00"
        }),
    )
    .await;
    let contract_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["check_in_photos"].as_array().unwrap().len(), 0);

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/contracts/{contract_id}/photos"),
        json!({ "kind": "check_in", "photos": ["data:image/jpeg;base64,AAAA"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["check_in_photos"].as_array().unwrap().len(), 1);
    assert_eq!(body["check_out_photos"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_company_profile_roundtrip() {
    let app = test_app();

    let (status, body) = send_empty(&app, "GET", "/api/company").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["legal_name"], "RentSync AI");

    // El perfil se reemplaza en bloque
    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/company",
        json!({
            "legal_name": "Noleggio Lombardia SRL",
            "vat_number": "12345678901",
            "address": "Via Roma 1, Milano",
            "email": "info@noleggiolombardia.it",
            "phone": "+39 02 555000"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["legal_name"], "Noleggio Lombardia SRL");

    let (_, body) = send_empty(&app, "GET", "/api/company").await;
    assert_eq!(body["vat_number"], "12345678901");
}

#[tokio::test]
async fn test_duplicate_nickname_is_rejected() {
    let app = test_app();

    let (status, _) = send_json(&app, "POST", "/api/agents", sample_agent("unico")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, "POST", "/api/agents", sample_agent("UNICO")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}
