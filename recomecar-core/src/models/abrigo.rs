//! Shelters (abrigos) and their capacity tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::patch::Patch;
use super::validation::{self, ValidationError};

/// A shelter as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Abrigo {
    pub id_abrigo: i64,
    pub nome: String,
    pub endereco: String,
    pub capacidade: i32,
    pub ocupacao_atual: i32,
    pub responsavel: Option<String>,
    pub telefone_responsavel: Option<String>,
    pub recursos_disponiveis: Option<String>,
    pub data_criacao: DateTime<Utc>,
}

/// Payload for `POST /abrigos`. Occupancy starts at zero unless given.
#[derive(Debug, Clone, Deserialize)]
pub struct AbrigoCreate {
    pub nome: String,
    pub endereco: String,
    pub capacidade: i32,
    #[serde(default)]
    pub ocupacao_atual: i32,
    #[serde(default)]
    pub responsavel: Option<String>,
    #[serde(default)]
    pub telefone_responsavel: Option<String>,
    #[serde(default)]
    pub recursos_disponiveis: Option<String>,
}

impl AbrigoCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text(&self.nome, "nome")?;
        validation::require_text(&self.endereco, "endereco")?;
        validation::require_non_negative(self.capacidade, "capacidade")?;
        validation::require_non_negative(self.ocupacao_atual, "ocupacao_atual")?;
        Ok(())
    }
}

/// Payload for `PUT /abrigos/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbrigoUpdate {
    #[serde(default)]
    pub nome: Patch<String>,
    #[serde(default)]
    pub endereco: Patch<String>,
    #[serde(default)]
    pub capacidade: Patch<i32>,
    #[serde(default)]
    pub ocupacao_atual: Patch<i32>,
    #[serde(default)]
    pub responsavel: Patch<String>,
    #[serde(default)]
    pub telefone_responsavel: Patch<String>,
    #[serde(default)]
    pub recursos_disponiveis: Patch<String>,
}

impl AbrigoUpdate {
    pub fn is_empty(&self) -> bool {
        self.nome.is_missing()
            && self.endereco.is_missing()
            && self.capacidade.is_missing()
            && self.ocupacao_atual.is_missing()
            && self.responsavel.is_missing()
            && self.telefone_responsavel.is_missing()
            && self.recursos_disponiveis.is_missing()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFields);
        }
        validation::require_text_patch(&self.nome, "nome")?;
        validation::require_text_patch(&self.endereco, "endereco")?;
        validation::require_count_patch(&self.capacidade, "capacidade")?;
        validation::require_count_patch(&self.ocupacao_atual, "ocupacao_atual")?;
        Ok(())
    }
}
