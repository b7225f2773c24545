//! Server assembly: router, CORS, tracing middleware, graceful shutdown.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use recomecar_core::config::HttpConfig;

use super::routes;
use crate::db::Database;

/// Build the full application router over a database gateway.
///
/// CORS is wide open — any origin, method, and header — because the
/// coordination front end is served from arbitrary origins during a
/// response operation.
pub fn build_router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::pessoas::router())
        .merge(routes::abrigos::router())
        .merge(routes::doacoes::router())
        .merge(routes::estatisticas::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}

/// Bind and serve until Ctrl+C / SIGTERM, then release the pool.
pub async fn serve(config: HttpConfig, db: Database) -> Result<(), std::io::Error> {
    let app = build_router(db.clone());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.shutdown().await;
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting shutdown");
        }
    }
}
