//! Liveness probe. Deliberately does not touch the database: a deployment
//! waiting for credentials must still answer its health checks.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::Database;

pub fn router() -> Router<Database> {
    Router::new().route("/health", get(health))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
