//! recomecar-core: domain models and configuration for the Recomecar relief API
//!
//! Holds the wire-level payload types shared by the HTTP layer and the
//! repositories, plus the environment-driven configuration. Field names are
//! the Portuguese column names consumed by the relief-coordination front end.

pub mod config;
pub mod models;

pub use config::{DbConfig, HttpConfig};
