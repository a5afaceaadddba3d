mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::json;
use sqquats_backend::models::StatusCheck;
use uuid::Uuid;

#[tokio::test]
async fn create_status_check_returns_persisted_record() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/status", app.api_address))
        .json(&json!({ "client_name": "Alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["client_name"], "Alice");
    let id = body["id"].as_str().expect("missing id");
    assert!(Uuid::parse_str(id).is_ok());
    assert!(body["timestamp"].is_string());

    // The record shows up in a subsequent listing
    let list: serde_json::Value = client
        .get(format!("{}/status", app.api_address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    let checks = list.as_array().expect("expected an array");
    assert!(checks.iter().any(|c| c["id"] == id));

    app.cleanup().await;
}

#[tokio::test]
async fn create_status_check_rejects_empty_client_name() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/status", app.api_address))
        .json(&json!({ "client_name": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 422);

    app.cleanup().await;
}

#[tokio::test]
async fn list_status_checks_is_capped_at_1000_records() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let checks: Vec<StatusCheck> = (0..1005)
        .map(|i| StatusCheck::new(format!("client-{}", i)))
        .collect();
    app.db
        .status_checks()
        .insert_many(&checks, None)
        .await
        .expect("Failed to seed status checks");

    let list: serde_json::Value = client
        .get(format!("{}/status", app.api_address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(list.as_array().expect("expected an array").len(), 1000);

    app.cleanup().await;
}

#[tokio::test]
async fn list_status_checks_starts_empty() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let list: serde_json::Value = client
        .get(format!("{}/status", app.api_address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(list.as_array().expect("expected an array").len(), 0);

    app.cleanup().await;
}
