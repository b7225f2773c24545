//! Donations (doacoes) and their destination shelters.
//!
//! `id_abrigo_destino` is a soft reference: a nullable integer pointing at a
//! shelter identity, never validated for existence and never cascaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::patch::Patch;
use super::validation::{self, ValidationError};

/// A donation as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doacao {
    pub id_doacao: i64,
    pub doador_nome: Option<String>,
    pub doador_telefone: Option<String>,
    pub tipo_doacao: String,
    pub descricao: String,
    pub quantidade: Option<String>,
    pub status: String,
    pub id_abrigo_destino: Option<i64>,
    pub data_doacao: DateTime<Utc>,
}

/// Payload for `POST /doacoes`.
#[derive(Debug, Clone, Deserialize)]
pub struct DoacaoCreate {
    #[serde(default)]
    pub doador_nome: Option<String>,
    #[serde(default)]
    pub doador_telefone: Option<String>,
    pub tipo_doacao: String,
    pub descricao: String,
    #[serde(default)]
    pub quantidade: Option<String>,
    pub status: String,
    #[serde(default)]
    pub id_abrigo_destino: Option<i64>,
}

impl DoacaoCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text(&self.tipo_doacao, "tipo_doacao")?;
        validation::require_text(&self.descricao, "descricao")?;
        validation::require_text(&self.status, "status")?;
        Ok(())
    }
}

/// Payload for `PUT /doacoes/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoacaoUpdate {
    #[serde(default)]
    pub doador_nome: Patch<String>,
    #[serde(default)]
    pub doador_telefone: Patch<String>,
    #[serde(default)]
    pub tipo_doacao: Patch<String>,
    #[serde(default)]
    pub descricao: Patch<String>,
    #[serde(default)]
    pub quantidade: Patch<String>,
    #[serde(default)]
    pub status: Patch<String>,
    #[serde(default)]
    pub id_abrigo_destino: Patch<i64>,
}

impl DoacaoUpdate {
    pub fn is_empty(&self) -> bool {
        self.doador_nome.is_missing()
            && self.doador_telefone.is_missing()
            && self.tipo_doacao.is_missing()
            && self.descricao.is_missing()
            && self.quantidade.is_missing()
            && self.status.is_missing()
            && self.id_abrigo_destino.is_missing()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFields);
        }
        validation::require_text_patch(&self.tipo_doacao, "tipo_doacao")?;
        validation::require_text_patch(&self.descricao, "descricao")?;
        validation::require_text_patch(&self.status, "status")?;
        Ok(())
    }
}
