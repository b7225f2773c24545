//! Entity repositories.
//!
//! One repository per entity, all borrowing the [`Database`](super::Database)
//! gateway and funneling every statement through its scoped executor. The
//! three CRUD repositories share one shape: create obtains the generated
//! identity via `INSERT … RETURNING` and re-reads the row so server-assigned
//! defaults are in the response; update touches only the fields present in
//! the payload; delete performs no dependency checks.

mod abrigos;
mod doacoes;
mod estatisticas;
mod pessoas;

pub use abrigos::AbrigoRepo;
pub use doacoes::DoacaoRepo;
pub use estatisticas::EstatisticasRepo;
pub use pessoas::PessoaRepo;
