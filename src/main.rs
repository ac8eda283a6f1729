//! Visit handler entry point.
//!
//! # Architecture Overview
//!
//! ```text
//!   platform runtime API ──┐                     ┌──────────────────────────────┐
//!   (AWS_LAMBDA_RUNTIME_API)│   ┌──────────────┐  │          Dispatcher          │
//!                           ├──▶│  lifecycle/  │─▶│ trace + correlation context  │
//!   local HTTP (axum) ──────┘   │ runtime/http │  │ structured logger            │
//!                               └──────────────┘  │ router → handlers            │
//!                                                 │   ├─ latency injection       │
//!                                                 │   └─ VisitStore (put / get)  │
//!                                                 └──────────────────────────────┘
//! ```
//!
//! Under the platform (`AWS_LAMBDA_RUNTIME_API` set) the binary polls the
//! runtime API; otherwise it serves plain HTTP on the configured address.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use visit_handler::config::{load_config, load_from_env};
use visit_handler::lifecycle::runtime::{self, RuntimeClient, RUNTIME_API_ENV};
use visit_handler::lifecycle::{bootstrap, startup, Shutdown};
use visit_handler::observability::metrics;
use visit_handler::LocalServer;

#[derive(Parser)]
#[command(name = "visit-handler")]
#[command(about = "Visit recording request handler", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "VISIT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };

    bootstrap::init(&config.observability);
    tracing::info!("visit-handler v{} starting", env!("CARGO_PKG_VERSION"));

    let store = startup::build_store(&config);
    let dispatcher = Arc::new(startup::build_dispatcher(&config, store));

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    if let Ok(api) = std::env::var(RUNTIME_API_ENV) {
        let client = RuntimeClient::new(&api)?;
        runtime::run(client, dispatcher, shutdown.subscribe()).await?;
    } else {
        if config.observability.metrics_enabled {
            match config.observability.metrics_address.parse() {
                Ok(addr) => {
                    if let Err(e) = metrics::init_metrics(addr) {
                        tracing::error!(error = %e, "Failed to start metrics endpoint");
                    }
                }
                Err(_) => tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                ),
            }
        }

        let listener = TcpListener::bind(&config.listener.bind_address).await?;
        LocalServer::new(dispatcher, &config.listener)
            .run(listener, shutdown.subscribe())
            .await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
