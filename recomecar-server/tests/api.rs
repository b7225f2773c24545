//! End-to-end tests driving the full router against a live Postgres.
//!
//! Ignored by default; point DATABASE_URL at a scratch database and run:
//!
//!   DATABASE_URL=postgres://... cargo test -p recomecar-server --test api -- --ignored --test-threads=1
//!
//! The statistics tests clear all three tables, so the suite assumes the
//! database is disposable and runs single-threaded.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use recomecar_core::config::DbConfig;
use recomecar_server::db::Database;
use recomecar_server::http::build_router;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL required")
}

async fn test_router() -> axum::Router {
    let config = DbConfig {
        url: Some(database_url()),
        ..DbConfig::default()
    };
    let db = Database::new(config);
    db.connect().await;
    build_router(db)
}

/// CPFs must be unique across the whole suite; nanos plus a counter keep
/// repeated runs against the same database from colliding.
fn unique_cpf() -> String {
    static SEQ: AtomicU32 = AtomicU32::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}{}", nanos, SEQ.fetch_add(1, Ordering::Relaxed))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn clear_tables() {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url())
        .await
        .expect("failed to connect for cleanup");
    for table in ["doacoes", "pessoas", "abrigos"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&pool)
            .await
            .expect("cleanup failed");
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_get_roundtrip() {
    let app = test_router().await;
    let cpf = unique_cpf();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/pessoas",
            Some(json!({
                "nome": "Maria Silva",
                "cpf": cpf,
                "telefone": "51999990000",
                "situacao": "desabrigado",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    let id = created["id_pessoa"].as_i64().expect("id assigned");
    assert_eq!(created["nome"], "Maria Silva");
    assert_eq!(created["cpf"], cpf.as_str());
    assert_eq!(created["endereco"], Value::Null);
    assert!(created["data_cadastro"].is_string(), "timestamp assigned");

    let response = app
        .oneshot(request("GET", &format!("/pessoas/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_cpf_is_a_conflict_naming_the_value() {
    let app = test_router().await;
    let cpf = unique_cpf();
    let payload = json!({ "nome": "João", "cpf": cpf, "situacao": "abrigado" });

    let first = app
        .clone()
        .oneshot(request("POST", "/pessoas", Some(payload.clone())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = json_body(first).await["id_pessoa"].as_i64().unwrap();

    let second = app
        .clone()
        .oneshot(request("POST", "/pessoas", Some(payload)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let detail = json_body(second).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains(&cpf), "conflict names the value: {detail}");

    // The first record is untouched.
    let still_there = app
        .oneshot(request("GET", &format!("/pessoas/{first_id}"), None))
        .await
        .unwrap();
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_changes_only_the_given_field() {
    let app = test_router().await;
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/pessoas",
            Some(json!({
                "nome": "Ana",
                "cpf": unique_cpf(),
                "telefone": "51911112222",
                "endereco": "Rua B, 10",
                "situacao": "desabrigado",
            })),
        ))
        .await
        .unwrap();
    let before = json_body(response).await;
    let id = before["id_pessoa"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/pessoas/{id}"),
            Some(json!({ "situacao": "abrigado" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let after = json_body(response).await;

    assert_eq!(after["situacao"], "abrigado");
    for field in ["id_pessoa", "nome", "cpf", "telefone", "endereco", "data_cadastro"] {
        assert_eq!(after[field], before[field], "{field} must be untouched");
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_with_empty_payload_is_rejected() {
    let app = test_router().await;
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/pessoas",
            Some(json!({ "nome": "Bea", "cpf": unique_cpf(), "situacao": "abrigado" })),
        ))
        .await
        .unwrap();
    let id = json_body(response).await["id_pessoa"].as_i64().unwrap();

    let response = app
        .oneshot(request("PUT", &format!("/pessoas/{id}"), Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["detail"],
        "Nenhum dado fornecido para atualização"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn null_on_a_required_field_is_rejected() {
    let app = test_router().await;
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/pessoas",
            Some(json!({ "nome": "Caio", "cpf": unique_cpf(), "situacao": "abrigado" })),
        ))
        .await
        .unwrap();
    let id = json_body(response).await["id_pessoa"].as_i64().unwrap();

    let response = app
        .oneshot(request(
            "PUT",
            &format!("/pessoas/{id}"),
            Some(json!({ "nome": null })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_id_is_not_found_for_get_update_and_delete() {
    let app = test_router().await;
    let id = i64::MAX - 7;

    let get = app
        .clone()
        .oneshot(request("GET", &format!("/abrigos/{id}"), None))
        .await
        .unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(get).await["detail"], "Abrigo não encontrado");

    // 404 wins even when the body would also be invalid.
    let update = app
        .clone()
        .oneshot(request("PUT", &format!("/abrigos/{id}"), Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = app
        .oneshot(request("DELETE", &format!("/abrigos/{id}"), None))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleted_record_disappears_from_get_and_list() {
    let app = test_router().await;
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/doacoes",
            Some(json!({
                "tipo_doacao": "roupa",
                "descricao": "cobertores",
                "status": "pendente",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id_doacao"].as_i64().unwrap();

    let delete = app
        .clone()
        .oneshot(request("DELETE", &format!("/doacoes/{id}"), None))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let get = app
        .clone()
        .oneshot(request("GET", &format!("/doacoes/{id}"), None))
        .await
        .unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);

    let list = app.oneshot(request("GET", "/doacoes", None)).await.unwrap();
    let listed = json_body(list).await;
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id_doacao"].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn statistics_on_an_empty_dataset_are_all_zero() {
    clear_tables().await;
    let app = test_router().await;

    let response = app.oneshot(request("GET", "/estatisticas", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "total_pessoas": 0,
            "pessoas_desabrigadas": 0,
            "total_abrigos": 0,
            "vagas_disponiveis": 0,
            "total_doacoes": 0,
            "doacoes_pendentes": 0,
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn central_shelter_scenario() {
    clear_tables().await;
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/abrigos",
            Some(json!({
                "nome": "Central",
                "endereco": "Rua A",
                "capacidade": 50,
                "ocupacao_atual": 0,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let abrigo = json_body(response).await;
    let abrigo_id = abrigo["id_abrigo"].as_i64().expect("id assigned");
    assert_eq!(abrigo["ocupacao_atual"], 0);
    assert!(abrigo["data_criacao"].is_string(), "timestamp assigned");

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/doacoes",
            Some(json!({
                "tipo_doacao": "alimento",
                "descricao": "arroz",
                "status": "pendente",
                "id_abrigo_destino": abrigo_id,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(request("GET", "/estatisticas", None)).await.unwrap();
    let stats = json_body(response).await;
    assert_eq!(stats["total_abrigos"], 1);
    assert_eq!(stats["total_doacoes"], 1);
    assert_eq!(stats["doacoes_pendentes"], 1);
    assert_eq!(stats["vagas_disponiveis"], 50);
}

#[tokio::test]
#[ignore = "requires database"]
async fn concurrent_creates_queue_at_the_pool_bound() {
    // Two connections for ten concurrent creates: acquires must queue, not
    // fail, and every row must get a distinct identity.
    let config = DbConfig {
        url: Some(database_url()),
        pool_min: 1,
        pool_max: 2,
        ..DbConfig::default()
    };
    let db = Database::new(config);
    db.connect().await;
    let app = build_router(db);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let response = app
                    .oneshot(request(
                        "POST",
                        "/pessoas",
                        Some(json!({
                            "nome": format!("Concorrente {i}"),
                            "cpf": unique_cpf(),
                            "situacao": "desabrigado",
                        })),
                    ))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::CREATED);
                json_body(response).await["id_pessoa"].as_i64().unwrap()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("task panicked"));
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10, "identities are distinct and never reused");
}
