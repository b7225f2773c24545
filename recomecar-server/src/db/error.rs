//! Database error taxonomy and driver error classification.

use thiserror::Error;

/// SQLSTATE codes meaning the session is gone or the server is unreachable:
/// class 08 (connection exception) plus the operator-shutdown family.
/// Matched by exact membership, never by substring.
const CONNECTIVITY_SQLSTATES: &[&str] = &[
    "08000", "08001", "08003", "08004", "08006", "08P01", "57P01", "57P02", "57P03",
];

/// SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// A failure reported by the storage layer, already classified.
#[derive(Debug, Error)]
pub enum DbError {
    /// Lookup by identity found nothing. Carries the user-facing message.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated. `field` is the column derived
    /// from the constraint name; repositories rewrite `message` into their
    /// domain wording.
    #[error("{message}")]
    Conflict { field: String, message: String },

    /// The pool is unavailable: not configured, connection lost, or
    /// exhausted. The caller may retry later.
    #[error("{0}")]
    Unavailable(String),

    /// Any other database failure; the driver message is kept for
    /// diagnostics.
    #[error("Erro no banco de dados: {0}")]
    Internal(String),
}

impl DbError {
    pub(crate) fn conflict(field: String) -> Self {
        let message = format!("Valor duplicado para o campo {field}.");
        DbError::Conflict { field, message }
    }

    pub(crate) fn closed() -> Self {
        DbError::Unavailable("Serviço de banco de dados encerrado.".to_string())
    }

    pub(crate) fn not_initialized() -> Self {
        DbError::Unavailable(
            "Serviço de banco de dados indisponível (pool não inicializado). \
             Verifique as configurações e logs do servidor."
                .to_string(),
        )
    }

    pub(crate) fn connection_lost() -> Self {
        DbError::Unavailable("Conexão com o banco de dados perdida. Tente novamente.".to_string())
    }

    pub(crate) fn pool_exhausted() -> Self {
        DbError::Unavailable(
            "Banco de dados sobrecarregado (pool esgotado). Tente novamente.".to_string(),
        )
    }
}

/// Outcome of classifying a raw driver error.
pub(crate) enum ErrorClass {
    /// Unique-constraint violation; carries the guarded field.
    Conflict { field: String },
    /// The session or server is gone; the pool must be discarded.
    Connectivity,
    /// All connections busy and the bounded wait elapsed. The pool itself is
    /// healthy, so it is not discarded.
    Exhausted,
    /// Everything else.
    Other,
}

/// Classify a driver error. Called from exactly one place
/// ([`Database::run`](super::Database::run)); downstream layers never
/// re-classify.
pub(crate) fn classify(err: &sqlx::Error) -> ErrorClass {
    match err {
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some(UNIQUE_VIOLATION) => ErrorClass::Conflict {
                field: constraint_field(db.constraint()).to_string(),
            },
            Some(code) if is_connectivity_code(code) => ErrorClass::Connectivity,
            _ => ErrorClass::Other,
        },
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Protocol(_) => {
            ErrorClass::Connectivity
        }
        sqlx::Error::PoolClosed => ErrorClass::Connectivity,
        sqlx::Error::PoolTimedOut => ErrorClass::Exhausted,
        _ => ErrorClass::Other,
    }
}

pub(crate) fn is_connectivity_code(code: &str) -> bool {
    CONNECTIVITY_SQLSTATES.contains(&code)
}

/// Map a violated constraint to the field it guards.
pub(crate) fn constraint_field(constraint: Option<&str>) -> &str {
    match constraint {
        Some("pessoas_cpf_unique") => "cpf",
        Some(other) => other,
        None => "desconhecido",
    }
}
