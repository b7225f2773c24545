//! Handlers for `/pessoas`.
//!
//! | Method   | Path            | Success | Notes                        |
//! |----------|-----------------|---------|------------------------------|
//! | `POST`   | `/pessoas`      | 201     | 409 on duplicate CPF         |
//! | `GET`    | `/pessoas`      | 200     | ordered by name              |
//! | `GET`    | `/pessoas/{id}` | 200     | 404 if absent                |
//! | `PUT`    | `/pessoas/{id}` | 200     | partial; 400 on empty body   |
//! | `DELETE` | `/pessoas/{id}` | 204     | 404 if absent                |

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use recomecar_core::models::{Pessoa, PessoaCreate, PessoaUpdate};

use crate::db::repos::PessoaRepo;
use crate::db::Database;
use crate::http::error::ApiError;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/pessoas", get(list_pessoas).post(create_pessoa))
        .route(
            "/pessoas/{id}",
            get(get_pessoa).put(update_pessoa).delete(delete_pessoa),
        )
}

pub async fn create_pessoa(
    State(db): State<Database>,
    Json(payload): Json<PessoaCreate>,
) -> Result<(StatusCode, Json<Pessoa>), ApiError> {
    payload.validate()?;
    let pessoa = PessoaRepo::new(&db).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(pessoa)))
}

pub async fn list_pessoas(State(db): State<Database>) -> Result<Json<Vec<Pessoa>>, ApiError> {
    Ok(Json(PessoaRepo::new(&db).list().await?))
}

pub async fn get_pessoa(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Pessoa>, ApiError> {
    Ok(Json(PessoaRepo::new(&db).get(id).await?))
}

/// Existence is checked before the payload, so an unknown id is 404 even
/// with an empty body.
pub async fn update_pessoa(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(payload): Json<PessoaUpdate>,
) -> Result<Json<Pessoa>, ApiError> {
    let repo = PessoaRepo::new(&db);
    repo.get(id).await?;
    payload.validate()?;
    Ok(Json(repo.update(id, &payload).await?))
}

pub async fn delete_pessoa(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = PessoaRepo::new(&db);
    repo.get(id).await?;
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
