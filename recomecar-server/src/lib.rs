//! recomecar-server: HTTP API for the Recomecar flood-relief service
//!
//! CRUD over pessoas, abrigos, and doacoes backed by Postgres, plus an
//! aggregate statistics endpoint consumed by the coordination front end.
//! The database is reached through a bounded, self-healing connection pool;
//! every driver failure is classified exactly once into the API error
//! taxonomy (400/404/409/503/500).

pub mod db;
pub mod http;
