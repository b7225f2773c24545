//! Connection pool construction.
//!
//! Bounds come from [`DbConfig`]: the pool keeps `pool_min` warm connections
//! and grows up to `pool_max`. Acquires past the maximum queue inside sqlx
//! and fail as pool-exhausted only once `acquire_timeout` elapses, so
//! concurrent load at the bound waits instead of failing spuriously.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use recomecar_core::config::DbConfig;

pub(crate) async fn create_pool(url: &str, config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.pool_min)
        .max_connections(config.pool_max)
        .acquire_timeout(config.acquire_timeout)
        .connect(url)
        .await
}
