//! Parcel Quote command-line entry point.
//!
//! - `serve` runs the REST API
//! - `estimate` prices a shipment read from a JSON file and prints the result
//!
//! # Configuration
//!
//! - `--config` - TOML file layered under `PARCEL_QUOTE__*` environment variables
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use parcel_quote::api::rest::{create_router, AppState, ShipmentDto};
use parcel_quote::config::EstimatorConfig;
use parcel_quote::logging::{init_logging, LoggingConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shipping-fee estimation")]
struct Cli {
    /// Configuration file. Defaults to `parcel-quote.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, overriding the configured one.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Estimate a shipment described in a JSON file.
    Estimate {
        /// Path to the shipment JSON.
        #[arg(long)]
        request: PathBuf,
        /// Price a single service class instead of all of them.
        #[arg(long)]
        service_class: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let config = EstimatorConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Command::Serve { bind } => serve(&config, bind).await,
        Command::Estimate {
            request,
            service_class,
        } => estimate(&config, &request, service_class.as_deref()).await,
    }
}

async fn serve(config: &EstimatorConfig, bind: Option<String>) -> Result<()> {
    let estimator = config
        .build_estimator()
        .context("failed to build estimator")?;
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let app = create_router(AppState::new(estimator));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("Server stopped");
    Ok(())
}

async fn estimate(
    config: &EstimatorConfig,
    request: &Path,
    service_class: Option<&str>,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(request)
        .await
        .with_context(|| format!("failed to read {}", request.display()))?;
    let dto: ShipmentDto = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", request.display()))?;
    let shipment = dto.into_shipment()?;
    let estimator = config
        .build_estimator()
        .context("failed to build estimator")?;

    let output = match service_class {
        Some(key) => serde_json::to_string_pretty(&estimator.estimate_by_key(&shipment, key).await?)?,
        None => serde_json::to_string_pretty(
            &estimator.estimate_all_service_classes(&shipment).await?,
        )?,
    };
    println!("{output}");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
