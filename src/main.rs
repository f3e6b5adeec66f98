//! Random element API.
//!
//! Serves the elements of a pre-loaded JSON array over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!   GET /random   │  ┌────────┐   ┌──────────┐   ┌──────────────┐    │
//!   GET /index/n ─┼─▶│ http   │──▶│ handlers │──▶│ ElementStore │    │
//!                 │  │ server │   └──────────┘   │  (ArcSwap)   │    │
//!                 │  └────────┘                  └──────▲───────┘    │
//!                 │       │                             │ publish    │
//!  POST /-/reload │       ▼                      ┌──────┴───────┐    │
//!  ───────────────┼──▶ reload handler ──────────▶│   Reload     │    │
//!                 │                              │ Coordinator  │    │
//!  SIGHUP ────────┼──▶ reload listener ─────────▶│  (one gate)  │    │
//!                 │                              └──────┬───────┘    │
//!                 │                                     │ load       │
//!                 │                              ┌──────▼───────┐    │
//!                 │                              │  FileLoader  │◀───┼── data.json
//!                 │                              └──────────────┘    │
//!                 └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use random_api::config::{self, Args};
use random_api::lifecycle;
use random_api::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::resolve(args).map_err(|e| format!("configuration error: {e}"))?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "random-api starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        route_prefix = %config.listener.route_prefix,
        data_path = %config.data.path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
