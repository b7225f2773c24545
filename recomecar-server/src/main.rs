use anyhow::Result;
use tracing_subscriber::EnvFilter;

use recomecar_core::config::{DbConfig, HttpConfig};
use recomecar_server::db::Database;
use recomecar_server::http;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let db = Database::new(DbConfig::from_env());
    // Warm-up is best effort: a deployment may come up before its database
    // credentials are provisioned, and operations retry initialization.
    db.connect().await;

    let config = HttpConfig::from_env();
    http::serve(config, db).await?;
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
