//! Handlers for `/abrigos`. Same five operations as `/pessoas`, without a
//! conflict case.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use recomecar_core::models::{Abrigo, AbrigoCreate, AbrigoUpdate};

use crate::db::repos::AbrigoRepo;
use crate::db::Database;
use crate::http::error::ApiError;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/abrigos", get(list_abrigos).post(create_abrigo))
        .route(
            "/abrigos/{id}",
            get(get_abrigo).put(update_abrigo).delete(delete_abrigo),
        )
}

pub async fn create_abrigo(
    State(db): State<Database>,
    Json(payload): Json<AbrigoCreate>,
) -> Result<(StatusCode, Json<Abrigo>), ApiError> {
    payload.validate()?;
    let abrigo = AbrigoRepo::new(&db).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(abrigo)))
}

pub async fn list_abrigos(State(db): State<Database>) -> Result<Json<Vec<Abrigo>>, ApiError> {
    Ok(Json(AbrigoRepo::new(&db).list().await?))
}

pub async fn get_abrigo(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Abrigo>, ApiError> {
    Ok(Json(AbrigoRepo::new(&db).get(id).await?))
}

pub async fn update_abrigo(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(payload): Json<AbrigoUpdate>,
) -> Result<Json<Abrigo>, ApiError> {
    let repo = AbrigoRepo::new(&db);
    repo.get(id).await?;
    payload.validate()?;
    Ok(Json(repo.update(id, &payload).await?))
}

/// Deleting a shelter referenced by donations is permitted; the donation
/// side keeps a dangling destination id.
pub async fn delete_abrigo(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = AbrigoRepo::new(&db);
    repo.get(id).await?;
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
