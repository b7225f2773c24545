//! Pessoa repository.

use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};

use recomecar_core::models::{Pessoa, PessoaCreate, PessoaUpdate};

use crate::db::{Database, DbError};

const NOT_FOUND: &str = "Pessoa não encontrada";

pub struct PessoaRepo<'a> {
    db: &'a Database,
}

impl<'a> PessoaRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert and return the freshly stored record, including the generated
    /// identity and registration timestamp. A CPF collision surfaces as a
    /// conflict naming the duplicated value.
    pub async fn create(&self, payload: &PessoaCreate) -> Result<Pessoa, DbError> {
        let id: i64 = self
            .db
            .run(|pool| async move {
                let row = sqlx::query(
                    "INSERT INTO pessoas (nome, cpf, telefone, endereco, situacao, necessidades)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING id_pessoa",
                )
                .bind(&payload.nome)
                .bind(&payload.cpf)
                .bind(&payload.telefone)
                .bind(&payload.endereco)
                .bind(&payload.situacao)
                .bind(&payload.necessidades)
                .fetch_one(&pool)
                .await?;
                row.try_get::<i64, _>("id_pessoa")
            })
            .await
            .map_err(|err| match err {
                DbError::Conflict { field, .. } if field == "cpf" => DbError::Conflict {
                    message: format!("CPF {} já cadastrado.", payload.cpf),
                    field,
                },
                other => other,
            })?;

        self.get(id).await
    }

    /// All records, ordered by name.
    pub async fn list(&self) -> Result<Vec<Pessoa>, DbError> {
        let rows = self
            .db
            .run(|pool| async move {
                sqlx::query(
                    "SELECT id_pessoa, nome, cpf, telefone, endereco, situacao, necessidades,
                            data_cadastro
                     FROM pessoas ORDER BY nome",
                )
                .fetch_all(&pool)
                .await
            })
            .await?;
        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Pessoa, DbError> {
        let row = self
            .db
            .run(|pool| async move {
                sqlx::query(
                    "SELECT id_pessoa, nome, cpf, telefone, endereco, situacao, necessidades,
                            data_cadastro
                     FROM pessoas WHERE id_pessoa = $1",
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
    pub async fn update(&self, id: i64, payload: &PessoaUpdate) -> Result<Pessoa, DbError> {
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
                sqlx::query("DELETE FROM pessoas WHERE id_pessoa = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|_| ())
            })
            .await
    }
}

fn from_row(row: &PgRow) -> Pessoa {
    Pessoa {
        id_pessoa: row.get("id_pessoa"),
        nome: row.get("nome"),
        cpf: row.get("cpf"),
        telefone: row.get("telefone"),
        endereco: row.get("endereco"),
        situacao: row.get("situacao"),
        necessidades: row.get("necessidades"),
        data_cadastro: row.get("data_cadastro"),
    }
}

/// Shape `UPDATE pessoas SET …` over only the fields present in the payload.
fn build_update<'args>(id: i64, payload: &'args PessoaUpdate) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE pessoas SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(value) = payload.nome.as_set() {
            fields.push("nome = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.telefone.as_set() {
            fields.push("telefone = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.endereco.as_set() {
            fields.push("endereco = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.situacao.as_set() {
            fields.push("situacao = ").push_bind_unseparated(value);
        }
        if let Some(value) = payload.necessidades.as_set() {
            fields.push("necessidades = ").push_bind_unseparated(value);
        }
    }
    builder.push(" WHERE id_pessoa = ").push_bind(id);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use recomecar_core::models::Patch;

    #[test]
    fn update_touches_only_present_fields() {
        let payload = PessoaUpdate {
            nome: Patch::Value("Maria".to_string()),
            telefone: Patch::Null,
            ..PessoaUpdate::default()
        };
        let builder = build_update(7, &payload);
        assert_eq!(
            builder.sql(),
            "UPDATE pessoas SET nome = $1, telefone = $2 WHERE id_pessoa = $3"
        );
    }

    #[test]
    fn update_with_one_field_binds_one_value() {
        let payload = PessoaUpdate {
            situacao: Patch::Value("abrigado".to_string()),
            ..PessoaUpdate::default()
        };
        let builder = build_update(1, &payload);
        assert_eq!(
            builder.sql(),
            "UPDATE pessoas SET situacao = $1 WHERE id_pessoa = $2"
        );
    }
}
