//! Gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p care-api --bin care-gateway
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use care_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    care_api::run(config).await?;

    info!("Gateway stopped");
    Ok(())
}
