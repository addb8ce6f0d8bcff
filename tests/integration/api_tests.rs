//! API tests against a running server backed by PostgreSQL

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

fn unique_code(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos % 1_000_000_000)
}

async fn create_equipment(client: &Client, code: &str) -> i64 {
    let response = client
        .post(format!("{}/equipamentos", BASE_URL))
        .json(&json!({
            "codigo": code,
            "tipo": "Escavadeira",
            "modelo": "Cat 320",
            "horimetro": 120.50,
            "statusOperacional": "Operacional",
            "dataAquisicao": "2023-02-01",
            "localizacaoAtual": "Setor Norte"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_create_and_delete_equipment() {
    let client = Client::new();
    let id = create_equipment(&client, &unique_code("EQ")).await;

    let response = client
        .delete(format!("{}/equipamentos/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/equipamentos/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_code_rejected_by_database_path() {
    let client = Client::new();
    let code = unique_code("DUP");
    let id = create_equipment(&client, &code).await;

    let response = client
        .post(format!("{}/equipamentos", BASE_URL))
        .json(&json!({
            "codigo": code,
            "tipo": "Trator",
            "modelo": "D6",
            "horimetro": 10,
            "statusOperacional": "Operacional",
            "dataAquisicao": "2023-02-01",
            "localizacaoAtual": "Base"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    client
        .delete(format!("{}/equipamentos/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
}

#[tokio::test]
#[ignore]
async fn test_ready_reaches_database() {
    let client = Client::new();
    let response = client
        .get("http://localhost:8080/ready")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}
