//! Router tests against the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use equipamentos_pesados::{
    api, repository::MemoryEquipmentStore, services::Services, AppConfig, AppState,
};

fn router() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Arc::new(MemoryEquipmentStore::new()))),
    };
    api::create_router(state)
}

async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn equipment(code: &str, tipo: &str) -> Value {
    json!({
        "codigo": code,
        "tipo": tipo,
        "modelo": "CAT320",
        "horimetro": 100.5,
        "statusOperacional": "Operacional",
        "dataAquisicao": "2020-01-15",
        "localizacaoAtual": "Obra A"
    })
}

async fn create(router: &Router, code: &str, tipo: &str) -> i64 {
    let (status, body) = call(router, "POST", "/api/equipamentos", Some(equipment(code, tipo))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_and_get() {
    let router = router();
    let id = create(&router, "EQ01", "Escavadeira").await;

    let (status, body) = call(&router, "GET", &format!("/api/equipamentos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["codigo"], "EQ01");
    assert_eq!(body["horimetro"], 100.5);
    assert_eq!(body["localizacaoAtual"], "Obra A");
}

#[tokio::test]
async fn test_create_sets_location_header() {
    let router = router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/equipamentos")
        .header("content-type", "application/json")
        .body(Body::from(equipment("LOC", "Trator").to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["location"], "/api/equipamentos/1");
}

#[tokio::test]
async fn test_duplicate_code_is_bad_request() {
    let router = router();
    create(&router, "DUPLICADO", "Caminhao").await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/equipamentos",
        Some(equipment("DUPLICADO", "Escavadeira")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Já existe um equipamento com esse código"));
    assert_eq!(body["field"], "Codigo");
}

#[tokio::test]
async fn test_zero_hour_meter_rejected_on_create() {
    let router = router();
    let mut data = equipment("ZERO", "Trator");
    data["horimetro"] = json!(0);
    let (status, body) = call(&router, "POST", "/api/equipamentos", Some(data)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O campo 'Horimetro' deve ser um valor positivo.");

    let mut data = equipment("SMALL", "Trator");
    data["horimetro"] = json!(0.01);
    let (status, _) = call(&router, "POST", "/api/equipamentos", Some(data)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_missing_fields_reported_first() {
    let router = router();
    let (status, body) = call(&router, "POST", "/api/equipamentos", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O campo 'Codigo' é obrigatório.");
}

#[tokio::test]
async fn test_unknown_id_is_not_found_everywhere() {
    let router = router();
    let cases = [
        ("GET", "/api/equipamentos/99", None),
        ("GET", "/api/equipamentos/99/status", None),
        ("PUT", "/api/equipamentos/99", Some(equipment("X", "Trator"))),
        ("DELETE", "/api/equipamentos/99", None),
        ("PATCH", "/api/equipamentos/99/avancar-status", None),
        (
            "PATCH",
            "/api/equipamentos/99/atualizar-horimetro",
            Some(json!({ "horimetro": 10 })),
        ),
        (
            "PATCH",
            "/api/equipamentos/99/atualizar-localizacao",
            Some(json!({ "localizacaoAtual": "Porto" })),
        ),
    ];

    for (method, uri, body) in cases {
        let (status, body) = call(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body, Value::Null);
    }
}

#[tokio::test]
async fn test_advance_status_cycle() {
    let router = router();
    let id = create(&router, "ST01", "Trator").await;
    let uri = format!("/api/equipamentos/{}/avancar-status", id);

    let mut seen = Vec::new();
    for _ in 0..3 {
        let (status, body) = call(&router, "PATCH", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        seen.push(body["statusOperacional"].as_str().unwrap().to_string());
    }
    assert_eq!(seen, ["ForaDeServico", "EmManutencao", "Operacional"]);

    let (_, body) = call(&router, "GET", &format!("/api/equipamentos/{}/status", id), None).await;
    assert_eq!(body, json!({ "status": "Operacional" }));
}

#[tokio::test]
async fn test_delete_then_get() {
    let router = router();
    let id = create(&router, "DEL", "Guindaste").await;
    let uri = format!("/api/equipamentos/{}", id);

    let (status, _) = call(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_code_collision() {
    let router = router();
    let first = create(&router, "A1", "Trator").await;
    create(&router, "B1", "Trator").await;
    let uri = format!("/api/equipamentos/{}", first);

    let (status, _) = call(&router, "PUT", &uri, Some(equipment("B1", "Trator"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut data = equipment("A1", "Carregadeira");
    data["modelo"] = json!("950H");
    let (status, body) = call(&router, "PUT", &uri, Some(data)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modelo"], "950H");
    assert_eq!(body["tipo"], "Carregadeira");
}

#[tokio::test]
async fn test_filter_by_type() {
    let router = router();
    create(&router, "E1", "Escavadeira").await;
    create(&router, "E2", "Escavadeira").await;
    create(&router, "C1", "Caminhao").await;

    let (status, body) = call(&router, "GET", "/api/equipamentos/escavadeira/tipo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = call(&router, "GET", "/api/equipamentos?tipo=CAMINHAO", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = call(&router, "GET", "/api/equipamentos", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_patch_hour_meter_and_location() {
    let router = router();
    let id = create(&router, "P1", "Trator").await;

    let uri = format!("/api/equipamentos/{}/atualizar-horimetro", id);
    let (status, _) = call(&router, "PATCH", &uri, Some(json!({ "horimetro": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = call(&router, "PATCH", &uri, Some(json!({ "horimetro": 250.75 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["horimetro"], 250.75);

    let uri = format!("/api/equipamentos/{}/atualizar-localizacao", id);
    let (status, body) = call(&router, "PATCH", &uri, Some(json!({ "localizacaoAtual": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O campo 'LocalizacaoAtual' é obrigatório.");
    let (status, body) = call(&router, "PATCH", &uri, Some(json!({ "localizacaoAtual": "Porto" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["localizacaoAtual"], "Porto");
}

#[tokio::test]
async fn test_health_and_ready() {
    let router = router();
    let (status, body) = call(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = call(&router, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_update_applies_same_rules_as_create() {
    let router = router();
    let id = create(&router, "U1", "Trator").await;
    let uri = format!("/api/equipamentos/{}", id);

    let (status, body) = call(&router, "PUT", &uri, Some(equipment("U1", "Bicicleta"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "O campo 'Tipo' deve ser um dos seguintes valores: Escavadeira, Caminhao, Carregadeira, Retroescavadeira, Trator, Guindaste."
    );

    let mut data = equipment("U1", "Trator");
    data["horimetro"] = json!(0);
    let (status, body) = call(&router, "PUT", &uri, Some(data)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O campo 'Horimetro' deve ser um valor positivo.");

    let (_, body) = call(&router, "GET", &uri, None).await;
    assert_eq!(body["tipo"], "Trator");
    assert_eq!(body["horimetro"], 100.5);
}

#[tokio::test]
async fn test_hour_meter_patch_rejects_zero_and_sub_cent_readings() {
    let router = router();
    let id = create(&router, "H0", "Trator").await;
    let uri = format!("/api/equipamentos/{}/atualizar-horimetro", id);

    for value in [json!(0), json!(0.001)] {
        let (status, body) = call(&router, "PATCH", &uri, Some(json!({ "horimetro": value }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "horimetro {}", value);
        assert_eq!(body["message"], "O campo 'Horimetro' deve ser um valor positivo.");
    }

    let mut data = equipment("H1", "Trator");
    data["horimetro"] = json!(0.004);
    let (status, _) = call(&router, "POST", "/api/equipamentos", Some(data)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hour_meter_above_column_range_is_bad_request() {
    let router = router();
    let mut data = equipment("BIG", "Trator");
    data["horimetro"] = json!(1e12);
    let (status, body) = call(&router, "POST", "/api/equipamentos", Some(data)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "Horimetro");

    let id = create(&router, "OK", "Trator").await;
    let uri = format!("/api/equipamentos/{}/atualizar-horimetro", id);
    let (status, _) = call(&router, "PATCH", &uri, Some(json!({ "horimetro": 1e12 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_null_required_field_is_bad_request() {
    let router = router();
    let mut data = equipment("NULL", "Trator");
    data["codigo"] = Value::Null;
    let (status, body) = call(&router, "POST", "/api/equipamentos", Some(data)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O campo 'Codigo' é obrigatório.");

    let id = create(&router, "LOCNULL", "Trator").await;
    let uri = format!("/api/equipamentos/{}/atualizar-localizacao", id);
    let (status, body) = call(&router, "PATCH", &uri, Some(json!({ "localizacaoAtual": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O campo 'LocalizacaoAtual' é obrigatório.");
}
