//! Handlers for `/doacoes`. Same five operations as `/pessoas`, without a
//! conflict case.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use recomecar_core::models::{Doacao, DoacaoCreate, DoacaoUpdate};

use crate::db::repos::DoacaoRepo;
use crate::db::Database;
use crate::http::error::ApiError;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/doacoes", get(list_doacoes).post(create_doacao))
        .route(
            "/doacoes/{id}",
            get(get_doacao).put(update_doacao).delete(delete_doacao),
        )
}

pub async fn create_doacao(
    State(db): State<Database>,
    Json(payload): Json<DoacaoCreate>,
) -> Result<(StatusCode, Json<Doacao>), ApiError> {
    payload.validate()?;
    let doacao = DoacaoRepo::new(&db).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(doacao)))
}

pub async fn list_doacoes(State(db): State<Database>) -> Result<Json<Vec<Doacao>>, ApiError> {
    Ok(Json(DoacaoRepo::new(&db).list().await?))
}

pub async fn get_doacao(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Doacao>, ApiError> {
    Ok(Json(DoacaoRepo::new(&db).get(id).await?))
}

pub async fn update_doacao(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(payload): Json<DoacaoUpdate>,
) -> Result<Json<Doacao>, ApiError> {
    let repo = DoacaoRepo::new(&db);
    repo.get(id).await?;
    payload.validate()?;
    Ok(Json(repo.update(id, &payload).await?))
}

pub async fn delete_doacao(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = DoacaoRepo::new(&db);
    repo.get(id).await?;
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
