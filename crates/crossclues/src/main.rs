//! `crossclues-server`: runs a CrossClues server until Ctrl-C.
//!
//! Configured through `CROSSCLUES_BIND`, `CROSSCLUES_IDLE_TIMEOUT_SECS`,
//! and `RUST_LOG`.

use crossclues::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), CrossCluesError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let server = CrossCluesServer::builder().config(config).build().await?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
}
