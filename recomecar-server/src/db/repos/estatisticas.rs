//! Aggregate statistics over the whole dataset.

use sqlx::{PgPool, Row};

use recomecar_core::models::Estatisticas;

use crate::db::{Database, DbError};

pub struct EstatisticasRepo<'a> {
    db: &'a Database,
}

impl<'a> EstatisticasRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Compute the full snapshot. All six reads run in one scope; a failure
    /// in any of them aborts the computation, so a partial snapshot is never
    /// returned. `COALESCE` turns the no-shelters sum into zero.
    pub async fn compute(&self) -> Result<Estatisticas, DbError> {
        self.db
            .run(|pool| async move {
                let total_pessoas = count(&pool, "SELECT COUNT(*) FROM pessoas").await?;
                let pessoas_desabrigadas = count(
                    &pool,
                    "SELECT COUNT(*) FROM pessoas WHERE situacao = 'desabrigado'",
                )
                .await?;
                let total_abrigos = count(&pool, "SELECT COUNT(*) FROM abrigos").await?;
                let vagas_disponiveis = count(
                    &pool,
                    "SELECT COALESCE(SUM(capacidade - ocupacao_atual), 0) FROM abrigos",
                )
                .await?;
                let total_doacoes = count(&pool, "SELECT COUNT(*) FROM doacoes").await?;
                let doacoes_pendentes = count(
                    &pool,
                    "SELECT COUNT(*) FROM doacoes WHERE status = 'pendente'",
                )
                .await?;

                Ok(Estatisticas {
                    total_pessoas,
                    pessoas_desabrigadas,
                    total_abrigos,
                    vagas_disponiveis,
                    total_doacoes,
                    doacoes_pendentes,
                })
            })
            .await
    }
}

async fn count(pool: &PgPool, sql: &str) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(sql).fetch_one(pool).await?;
    row.try_get(0)
}
