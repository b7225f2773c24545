//! Route modules, one per resource.

pub mod abrigos;
pub mod doacoes;
pub mod estatisticas;
pub mod health;
pub mod pessoas;
