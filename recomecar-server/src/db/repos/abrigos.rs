//! Abrigo repository.

use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};

use recomecar_core::models::{Abrigo, AbrigoCreate, AbrigoUpdate};

use crate::db::{Database, DbError};

const NOT_FOUND: &str = "Abrigo não encontrado";

pub struct AbrigoRepo<'a> {
    db: &'a Database,
}

impl<'a> AbrigoRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert and return the freshly stored record, creation timestamp
    /// included.
    pub async fn create(&self, payload: &AbrigoCreate) -> Result<Abrigo, DbError> {
        let id: i64 = self
            .db
            .run(|pool| async move {
                let row = sqlx::query(
                    "INSERT INTO abrigos (nome, endereco, capacidade, ocupacao_atual,
                                          responsavel, telefone_responsavel, recursos_disponiveis)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING id_abrigo",
                )
                .bind(&payload.nome)
                .bind(&payload.endereco)
                .bind(payload.capacidade)
                .bind(payload.ocupacao_atual)
                .bind(&payload.responsavel)
                .bind(&payload.telefone_responsavel)
                .bind(&payload.recursos_disponiveis)
                .fetch_one(&pool)
                .await?;
                row.try_get::<i64, _>("id_abrigo")
            })
            .await?;

        self.get(id).await
    }

    /// All records, ordered by name.
    pub async fn list(&self) -> Result<Vec<Abrigo>, DbError> {
        let rows = self
            .db
            .run(|pool| async move {
                sqlx::query(
                    "SELECT id_abrigo, nome, endereco, capacidade, ocupacao_atual, responsavel,
                            telefone_responsavel, recursos_disponiveis, data_criacao
                     FROM abrigos ORDER BY nome",
                )
                .fetch_all(&pool)
                .await
            })
            .await?;
        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Abrigo, DbError> {
        let row = self
            .db
            .run(|pool| async move {
                sqlx::query(
                    "SELECT id_abrigo, nome, endereco, capacidade, ocupacao_atual, responsavel,
                            telefone_responsavel, recursos_disponiveis, data_criacao
                     FROM abrigos WHERE id_abrigo = $1",
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
    pub async fn update(&self, id: i64, payload: &AbrigoUpdate) -> Result<Abrigo, DbError> {
        self.db
            .run(|pool| async move {
                build_update(id, payload).build().execute(&pool).await.map(|_| ())
            })
            .await?;
        self.get(id).await
    }

    /// Delete by identity. Donations keep pointing at the dead id: the
    /// destination reference is soft and no cascade or guard exists.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.db
            .run(|pool| async move {
                sqlx::query("DELETE FROM abrigos WHERE id_abrigo = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|_| ())
            })
            .await
    }
}

fn from_row(row: &PgRow) -> Abrigo {
    Abrigo {
        id_abrigo: row.get("id_abrigo"),
        nome: row.get("nome"),
        endereco: row.get("endereco"),
        capacidade: row.get("capacidade"),
        ocupacao_atual: row.get("ocupacao_atual"),
        responsavel: row.get("responsavel"),
        telefone_responsavel: row.get("telefone_responsavel"),
        recursos_disponiveis: row.get("recursos_disponiveis"),
        data_criacao: row.get("data_criacao"),
    }
}

fn build_update<'args>(id: i64, payload: &'args AbrigoUpdate) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE abrigos SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(value) = payload.nome.as_set() {
            fields.push("nome = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.endereco.as_set() {
            fields.push("endereco = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.capacidade.as_set() {
            fields.push("capacidade = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.ocupacao_atual.as_set() {
            fields.push("ocupacao_atual = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.responsavel.as_set() {
            fields.push("responsavel = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.telefone_responsavel.as_set() {
            fields
                .push("telefone_responsavel = ")
                .push_bind_unseparated(value);
        }
        if let Some(value) = payload.recursos_disponiveis.as_set() {
            fields
                .push("recursos_disponiveis = ")
                .push_bind_unseparated(value);
        }
    }
    builder.push(" WHERE id_abrigo = ").push_bind(id);
    builder
}
