//! Idempotent schema bootstrap, run whenever a fresh pool comes up.
//!
//! Identity and creation timestamp are assigned by the database and only by
//! the database: `BIGSERIAL` plus `DEFAULT now()`. The CPF uniqueness
//! constraint is named so the error classifier can map a violation back to
//! its field.

use sqlx::PgPool;

const CREATE_PESSOAS: &str = r#"
    CREATE TABLE IF NOT EXISTS pessoas (
        id_pessoa     BIGSERIAL PRIMARY KEY,
        nome          TEXT NOT NULL,
        cpf           TEXT NOT NULL,
        telefone      TEXT,
        endereco      TEXT,
        situacao      TEXT NOT NULL,
        necessidades  TEXT,
        data_cadastro TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT pessoas_cpf_unique UNIQUE (cpf)
    )
"#;

const CREATE_ABRIGOS: &str = r#"
    CREATE TABLE IF NOT EXISTS abrigos (
        id_abrigo            BIGSERIAL PRIMARY KEY,
        nome                 TEXT NOT NULL,
        endereco             TEXT NOT NULL,
        capacidade           INTEGER NOT NULL CHECK (capacidade >= 0),
        ocupacao_atual       INTEGER NOT NULL DEFAULT 0 CHECK (ocupacao_atual >= 0),
        responsavel          TEXT,
        telefone_responsavel TEXT,
        recursos_disponiveis TEXT,
        data_criacao         TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

// id_abrigo_destino is a soft reference: no FK, no cascade. Deleting a
// shelter leaves donations pointing at a dead id, and that is documented
// behavior.
const CREATE_DOACOES: &str = r#"
    CREATE TABLE IF NOT EXISTS doacoes (
        id_doacao         BIGSERIAL PRIMARY KEY,
        doador_nome       TEXT,
        doador_telefone   TEXT,
        tipo_doacao       TEXT NOT NULL,
        descricao         TEXT NOT NULL,
        quantidade        TEXT,
        status            TEXT NOT NULL,
        id_abrigo_destino BIGINT,
        data_doacao       TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

pub(crate) async fn init(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_PESSOAS, CREATE_ABRIGOS, CREATE_DOACOES] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema bootstrap complete");
    Ok(())
}
