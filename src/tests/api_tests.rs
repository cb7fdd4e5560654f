use super::create_test_service;
use crate::api;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    api::router(Arc::new(create_test_service()))
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, uri: &str, token: Option<&str>, body: Vec<u8>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = app.clone().oneshot(builder.body(Body::from(body)).unwrap()).await.unwrap();
    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    assert_eq!(content_type.unwrap(), "application/json");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "name": "Test User", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_register_and_login() {
    let app = test_app();
    register(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ALICE@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap().to_string();
    let (status, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, body["user"]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "alice@example.com", "name": "Alice", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "bob@example.com", "name": "Bob", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/workspaces/mine", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/workspaces/mine", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ledger_flow() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/workspaces",
        Some(&owner),
        Some(json!({ "name": "Corner Shop" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Corner Shop");
    let ws = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/workspaces/{}/parties", ws),
        Some(&owner),
        Some(json!({ "name": "Acme", "type": "customer" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/workspaces/{}/parties", ws),
        Some(&owner),
        Some(json!({ "name": "Bolts Ltd", "type": "supplier", "phone": "555-0100" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let supplier = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/workspaces/{}/parties/{}/transactions", ws, customer),
        Some(&owner),
        Some(json!({ "amount": 100, "direction": "gave", "date": "2024-06-02T12:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let tx = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/workspaces/{}/parties/{}/transactions", ws, supplier),
        Some(&owner),
        Some(json!({
            "amount": 40.5,
            "direction": "gave",
            "date": "2024-06-03T12:00:00Z",
            "description": "Bolts",
            "billImageUrl": "https://img.example.com/b.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", &format!("/api/workspaces/{}/home", ws), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["willGive"].as_f64(), Some(40.5));
    assert_eq!(body["totals"]["willGet"].as_f64(), Some(100.0));
    assert_eq!(body["recent"].as_array().unwrap().len(), 2);
    assert_eq!(body["recent"][0]["description"], "Bolts");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/workspaces/{}/parties?type=customer", ws),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], customer.as_str());
    assert_eq!(rows[0]["type"], "customer");
    assert_eq!(rows[0]["willGet"].as_f64(), Some(100.0));
    assert_eq!(rows[0]["willGive"].as_f64(), Some(0.0));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/workspaces/{}/transactions/{}", ws, tx),
        Some(&owner),
        Some(json!({ "amount": 75, "direction": "got" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"].as_f64(), Some(75.0));
    assert_eq!(body["direction"], "got");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/workspaces/{}/parties/{}", ws, customer),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"]["willGive"].as_f64(), Some(75.0));
    assert_eq!(body["balance"]["willGet"].as_f64(), Some(0.0));
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/workspaces/{}/transactions/{}", ws, tx),
        Some(&owner),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/workspaces/{}/transactions/{}", ws, tx);
    let (status, body) = send(&app, "DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Transaction not found");
}

#[tokio::test]
async fn test_workspace_access_statuses() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let clerk = register(&app, "clerk@example.com").await;
    let stranger = register(&app, "stranger@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/workspaces",
        Some(&owner),
        Some(json!({ "name": "Shop", "members": ["Clerk@Example.com"] })),
    )
    .await;
    let ws = body["id"].as_str().unwrap().to_string();
    let home = format!("/api/workspaces/{}/home", ws);

    let (status, _) = send(&app, "GET", &home, Some(&clerk), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &home, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not a member of this workspace");

    let (status, body) = send(&app, "GET", "/api/workspaces/missing/home", Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Workspace not found");

    let (status, body) = send(&app, "GET", "/api/workspaces/mine", Some(&clerk), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": ws, "name": "Shop" }]));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/workspaces/{workspace_id}/home").is_some());
}

#[tokio::test]
async fn test_malformed_bodies_are_json_400() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let (_, body) = send(&app, "POST", "/api/workspaces", Some(&owner), Some(json!({ "name": "Shop" }))).await;
    let ws = body["id"].as_str().unwrap().to_string();
    let parties = format!("/api/workspaces/{}/parties", ws);

    let (status, body) = send(&app, "POST", &parties, Some(&owner), Some(json!({ "type": "customer" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, body) = send(
        &app,
        "POST",
        &parties,
        Some(&owner),
        Some(json!({ "name": "Acme", "type": "vendor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(&app, "/api/auth/login", None, b"{not json".to_vec()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "GET", &format!("{}?type=vendor", parties), Some(&owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let name = "x".repeat(crate::constants::MAX_BODY_BYTES);
    let payload = serde_json::to_vec(&json!({ "name": name })).unwrap();

    let (status, body) = send_raw(&app, "/api/workspaces", Some(&owner), payload).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Request body is too large");
}

#[tokio::test]
async fn test_amount_above_cap_is_400() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let (_, body) = send(&app, "POST", "/api/workspaces", Some(&owner), Some(json!({ "name": "Shop" }))).await;
    let ws = body["id"].as_str().unwrap().to_string();
    let (_, body) = send(
        &app,
        "POST",
        &format!("/api/workspaces/{}/parties", ws),
        Some(&owner),
        Some(json!({ "name": "Acme", "type": "customer" })),
    )
    .await;
    let party = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/workspaces/{}/parties/{}/transactions", ws, party),
        Some(&owner),
        Some(json!({ "amount": 5e28, "direction": "gave", "date": "2024-06-02T12:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
