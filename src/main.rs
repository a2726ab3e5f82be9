//! ==============================================================================
//! main.rs - plant monitoring receiver entry point
//! ==============================================================================
//!
//! purpose:
//!     accepts telemetry pushed by the field device (temperature, moisture) and
//!     by the plant-health check (disease label, probability), keeps only the
//!     latest value of each and shows them on a single page.
//!
//! relationships:
//!     - uses: config.rs (receiver.toml + PORT override)
//!     - uses: store.rs (shared latest-value state)
//!     - uses: server.rs (axum routes, graceful shutdown)
//!
//! architecture:
//!
//!     ┌──────────────────────────────────────────────────┐
//!     │              receiver (this binary)              │
//!     │                                                  │
//!     │  POST /data ──► ingest ──┐                       │
//!     │                          ▼                       │
//!     │                  ┌───────────────┐               │
//!     │                  │ TelemetryStore│ <- store.rs   │
//!     │                  └───────┬───────┘               │
//!     │                          ▼                       │
//!     │  GET /      ◄── render::view                     │
//!     │  GET /api   ◄── json snapshot                    │
//!     └──────────────────────────────────────────────────┘
//!
//! ==============================================================================

mod config;
mod domain;
mod render;
mod server;
mod store;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration (logging is not up yet, report afterwards)
    let discovered = config::ReceiverConfig::discover();
    let mut config = match &discovered {
        Ok(Some((_, config))) => config.clone(),
        _ => config::ReceiverConfig::default(),
    };

    // step 2: logging, RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match discovered {
        Ok(Some((path, _))) => info!("[CONFIG] Loaded from {}", path.display()),
        Ok(None) => warn!("[CONFIG] No config file found - using defaults"),
        Err(e) => warn!("[CONFIG] {:#} - using defaults", e),
    }

    config.apply_env()?;
    let addr = config.listen_addr()?;

    // step 3: state lives exactly as long as the server
    let store = store::TelemetryStore::new();
    server::run(store, addr).await
}
