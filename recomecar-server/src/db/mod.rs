//! Database gateway: pool lifecycle and scoped query execution.
//!
//! All storage access funnels through [`Database::run`], which resolves the
//! pool (initializing it on demand), executes one operation, and classifies
//! any driver failure exactly once. Connectivity losses discard the whole
//! pool so the next operation starts from a clean slate; the failed
//! operation itself is never retried.

mod error;
mod pool;
pub mod repos;
mod schema;

pub use error::DbError;

use std::future::Future;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;

use recomecar_core::config::{DbConfig, MissingConfig};

use error::ErrorClass;

/// Lifecycle of the underlying connection pool.
enum PoolState {
    /// No pool yet; the next operation attempts initialization.
    Uninitialized,
    /// Live pool serving connections.
    Ready(PgPool),
    /// Pool was discarded after a connectivity failure; the next operation
    /// attempts a fresh initialization.
    Invalidated,
    /// Shut down; unusable until [`Database::connect`] is called again.
    Closed,
}

#[derive(Debug, Error)]
enum InitError {
    #[error(transparent)]
    Config(#[from] MissingConfig),

    #[error("falha ao conectar: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Handle to the database. Cheap to clone; all clones share one pool.
///
/// Construction never fails: the gateway accepts incomplete configuration
/// (deploy-before-configure) and reports a service-unavailable error on use
/// instead of crashing the process at startup.
#[derive(Clone)]
pub struct Database {
    config: DbConfig,
    state: Arc<RwLock<PoolState>>,
}

impl Database {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(PoolState::Uninitialized)),
        }
    }

    /// Eagerly initialize the pool. A failure is logged, not fatal: the next
    /// operation retries. Also the re-entry point after [`Database::shutdown`].
    pub async fn connect(&self) {
        let mut state = self.state.write().await;
        if matches!(*state, PoolState::Ready(_)) {
            return;
        }
        *state = PoolState::Uninitialized;
        match self.init_pool().await {
            Ok(pool) => *state = PoolState::Ready(pool),
            Err(err) => tracing::warn!("database pool not initialized: {err}"),
        }
    }

    /// Close every pooled connection and park the gateway; operations fail
    /// with service-unavailable until [`Database::connect`] is called again.
    pub async fn shutdown(&self) {
        let mut state = self.state.write().await;
        if let PoolState::Ready(pool) = &*state {
            pool.close().await;
        }
        *state = PoolState::Closed;
    }

    /// Run one storage operation against the pooled connection set.
    ///
    /// Connections are checked out per statement inside `op` and returned to
    /// the pool on drop, on every exit path. Driver errors are classified
    /// here and nowhere else: conflicts keep the violated field, connectivity
    /// losses invalidate the pool and surface as service-unavailable,
    /// exhaustion surfaces as service-unavailable without invalidation, and
    /// the rest become internal storage errors.
    pub(crate) async fn run<T, F, Fut>(&self, op: F) -> Result<T, DbError>
    where
        F: FnOnce(PgPool) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let pool = self.pool().await?;
        match op(pool).await {
            Ok(value) => Ok(value),
            Err(err) => match error::classify(&err) {
                ErrorClass::Conflict { field } => Err(DbError::conflict(field)),
                ErrorClass::Connectivity => {
                    self.invalidate().await;
                    Err(DbError::connection_lost())
                }
                ErrorClass::Exhausted => Err(DbError::pool_exhausted()),
                ErrorClass::Other => Err(DbError::Internal(err.to_string())),
            },
        }
    }

    /// Resolve a live pool. `Uninitialized` and `Invalidated` get exactly one
    /// initialization attempt per call; `Closed` always fails.
    async fn pool(&self) -> Result<PgPool, DbError> {
        {
            let state = self.state.read().await;
            match &*state {
                PoolState::Ready(pool) => return Ok(pool.clone()),
                PoolState::Closed => return Err(DbError::closed()),
                _ => {}
            }
        }

        let mut state = self.state.write().await;
        // Another task may have initialized while we waited for the lock.
        match &*state {
            PoolState::Ready(pool) => return Ok(pool.clone()),
            PoolState::Closed => return Err(DbError::closed()),
            _ => {}
        }

        match self.init_pool().await {
            Ok(pool) => {
                *state = PoolState::Ready(pool.clone());
                Ok(pool)
            }
            Err(err) => {
                tracing::error!("database pool initialization failed: {err}");
                Err(DbError::not_initialized())
            }
        }
    }

    async fn init_pool(&self) -> Result<PgPool, InitError> {
        let url = self.config.url()?;
        let pool = pool::create_pool(&url, &self.config).await?;
        schema::init(&pool).await?;
        tracing::info!(
            min = self.config.pool_min,
            max = self.config.pool_max,
            "database pool initialized"
        );
        Ok(pool)
    }

    /// Discard the pool after a connectivity failure so the next operation
    /// starts a fresh one.
    async fn invalidate(&self) {
        let mut state = self.state.write().await;
        match &*state {
            PoolState::Ready(_) => {
                let old = std::mem::replace(&mut *state, PoolState::Invalidated);
                if let PoolState::Ready(pool) = old {
                    tracing::warn!("connectivity failure: discarding connection pool");
                    pool.close().await;
                }
            }
            PoolState::Closed => {}
            _ => *state = PoolState::Invalidated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lifecycle behavior that needs no live database.

    #[tokio::test]
    async fn unconfigured_gateway_reports_unavailable() {
        let db = Database::new(DbConfig::default());
        let err = db
            .run(|_pool| async { Ok::<(), sqlx::Error>(()) })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[tokio::test]
    async fn connect_with_missing_config_does_not_crash() {
        let db = Database::new(DbConfig::default());
        db.connect().await;
        // Still answers (with unavailable) rather than panicking.
        let err = db
            .run(|_pool| async { Ok::<(), sqlx::Error>(()) })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[tokio::test]
    async fn shutdown_parks_the_gateway() {
        let db = Database::new(DbConfig::default());
        db.shutdown().await;
        let err = db
            .run(|_pool| async { Ok::<(), sqlx::Error>(()) })
            .await
            .unwrap_err();
        match err {
            DbError::Unavailable(message) => assert!(message.contains("encerrado")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
