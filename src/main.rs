//! fabwatch: terminal dashboard for simulated fabric-inspection telemetry.
//!
//! Run with:  `RUST_LOG=info fabwatch [path/to/fabwatch.toml]`

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging on stderr; stdout carries the panels.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("fabwatch v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(fabwatch_config::default_path);

    fabwatch_dashboard::run(config_path).await.map_err(Into::into)
}
