//! Domain models and request payloads.
//!
//! Each entity has three shapes: the stored record, a full-create payload
//! (required fields enforced by serde, the rest defaultable), and a
//! partial-update payload where every field is a [`Patch`] so that an
//! omitted key, an explicit `null`, and a value are all distinguishable.

pub mod abrigo;
pub mod doacao;
pub mod estatisticas;
pub mod patch;
pub mod pessoa;
pub mod validation;

pub use abrigo::{Abrigo, AbrigoCreate, AbrigoUpdate};
pub use doacao::{Doacao, DoacaoCreate, DoacaoUpdate};
pub use estatisticas::Estatisticas;
pub use patch::Patch;
pub use pessoa::{Pessoa, PessoaCreate, PessoaUpdate};
pub use validation::ValidationError;
