//! HTTP surface: error mapping, request handlers, server assembly.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, serve};
