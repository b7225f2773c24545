//! Aggregate statistics snapshot.

use serde::{Deserialize, Serialize};

/// Operation-wide counters returned by `GET /estatisticas`.
///
/// All six fields are computed in one pass; a partial snapshot is never
/// produced. An empty dataset yields zeros, not nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estatisticas {
    pub total_pessoas: i64,
    pub pessoas_desabrigadas: i64,
    pub total_abrigos: i64,
    pub vagas_disponiveis: i64,
    pub total_doacoes: i64,
    pub doacoes_pendentes: i64,
}
