//! Registered persons (pessoas) displaced by the flood.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::patch::Patch;
use super::validation::{self, ValidationError};

/// A registered person as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pessoa {
    pub id_pessoa: i64,
    pub nome: String,
    pub cpf: String,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub situacao: String,
    pub necessidades: Option<String>,
    pub data_cadastro: DateTime<Utc>,
}

/// Payload for `POST /pessoas`.
#[derive(Debug, Clone, Deserialize)]
pub struct PessoaCreate {
    pub nome: String,
    pub cpf: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    pub situacao: String,
    #[serde(default)]
    pub necessidades: Option<String>,
}

impl PessoaCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text(&self.nome, "nome")?;
        validation::require_text(&self.cpf, "cpf")?;
        validation::require_text(&self.situacao, "situacao")?;
        Ok(())
    }
}

/// Payload for `PUT /pessoas/{id}`. Only present fields are written; the CPF
/// is immutable after registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PessoaUpdate {
    #[serde(default)]
    pub nome: Patch<String>,
    #[serde(default)]
    pub telefone: Patch<String>,
    #[serde(default)]
    pub endereco: Patch<String>,
    #[serde(default)]
    pub situacao: Patch<String>,
    #[serde(default)]
    pub necessidades: Patch<String>,
}

impl PessoaUpdate {
    pub fn is_empty(&self) -> bool {
        self.nome.is_missing()
            && self.telefone.is_missing()
            && self.endereco.is_missing()
            && self.situacao.is_missing()
            && self.necessidades.is_missing()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFields);
        }
        validation::require_text_patch(&self.nome, "nome")?;
        validation::require_text_patch(&self.situacao, "situacao")?;
        Ok(())
    }
}
