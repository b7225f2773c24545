//! Handler for `/estatisticas`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use recomecar_core::models::Estatisticas;

use crate::db::repos::EstatisticasRepo;
use crate::db::Database;
use crate::http::error::ApiError;

pub fn router() -> Router<Database> {
    Router::new().route("/estatisticas", get(get_estatisticas))
}

/// `GET /estatisticas` — the full snapshot or nothing.
pub async fn get_estatisticas(
    State(db): State<Database>,
) -> Result<Json<Estatisticas>, ApiError> {
    Ok(Json(EstatisticasRepo::new(&db).compute().await?))
}
