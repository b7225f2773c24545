//! Doacao repository.

use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};

use recomecar_core::models::{Doacao, DoacaoCreate, DoacaoUpdate};

use crate::db::{Database, DbError};

const NOT_FOUND: &str = "Doação não encontrada";

pub struct DoacaoRepo<'a> {
    db: &'a Database,
}

impl<'a> DoacaoRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert and return the freshly stored record, donation timestamp
    /// included. The destination shelter id is stored as given, without an
    /// existence check.
    pub async fn create(&self, payload: &DoacaoCreate) -> Result<Doacao, DbError> {
        let id: i64 = self
            .db
            .run(|pool| async move {
                let row = sqlx::query(
                    "INSERT INTO doacoes (doador_nome, doador_telefone, tipo_doacao, descricao,
                                          quantidade, status, id_abrigo_destino)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING id_doacao",
                )
                .bind(&payload.doador_nome)
                .bind(&payload.doador_telefone)
                .bind(&payload.tipo_doacao)
                .bind(&payload.descricao)
                .bind(&payload.quantidade)
                .bind(&payload.status)
                .bind(payload.id_abrigo_destino)
                .fetch_one(&pool)
                .await?;
                row.try_get::<i64, _>("id_doacao")
            })
            .await?;

        self.get(id).await
    }

    /// All records, newest donation first.
    pub async fn list(&self) -> Result<Vec<Doacao>, DbError> {
        let rows = self
            .db
            .run(|pool| async move {
                sqlx::query(
                    "SELECT id_doacao, doador_nome, doador_telefone, tipo_doacao, descricao,
                            quantidade, status, id_abrigo_destino, data_doacao
                     FROM doacoes ORDER BY data_doacao DESC",
                )
                .fetch_all(&pool)
                .await
            })
            .await?;
        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Doacao, DbError> {
        let row = self
            .db
            .run(|pool| async move {
                sqlx::query(
                    "SELECT id_doacao, doador_nome, doador_telefone, tipo_doacao, descricao,
                            quantidade, status, id_abrigo_destino, data_doacao
                     FROM doacoes WHERE id_doacao = $1",
                )
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?;
        row.map(|r| from_row(&r))
            .ok_or_else(|| DbError::NotFound(NOT_FOUND.to_string()))
    }

    /// Write the present fields and return the fresh record. Assumes a
    /// validated, non-empty payload.
    pub async fn update(&self, id: i64, payload: &DoacaoUpdate) -> Result<Doacao, DbError> {
        self.db
            .run(|pool| async move {
                build_update(id, payload).build().execute(&pool).await.map(|_| ())
            })
            .await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.db
            .run(|pool| async move {
                sqlx::query("DELETE FROM doacoes WHERE id_doacao = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|_| ())
            })
            .await
    }
}

fn from_row(row: &PgRow) -> Doacao {
    Doacao {
        id_doacao: row.get("id_doacao"),
        doador_nome: row.get("doador_nome"),
        doador_telefone: row.get("doador_telefone"),
        tipo_doacao: row.get("tipo_doacao"),
        descricao: row.get("descricao"),
        quantidade: row.get("quantidade"),
        status: row.get("status"),
        id_abrigo_destino: row.get("id_abrigo_destino"),
        data_doacao: row.get("data_doacao"),
    }
}

fn build_update<'args>(id: i64, payload: &'args DoacaoUpdate) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE doacoes SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(value) = payload.doador_nome.as_set() {
            fields.push("doador_nome = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.doador_telefone.as_set() {
            fields.push("doador_telefone = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.tipo_doacao.as_set() {
            fields.push("tipo_doacao = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.descricao.as_set() {
            fields.push("descricao = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.quantidade.as_set() {
            fields.push("quantidade = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.status.as_set() {
            fields.push("status = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.id_abrigo_destino.as_set() {
            fields
                .push("id_abrigo_destino = ")
                .push_bind_unseparated(value);
        }
    }
    builder.push(" WHERE id_doacao = ").push_bind(id);
    builder
}
