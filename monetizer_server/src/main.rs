//! Crypto Monetizer API server.
//!
//! This binary wires together:
//!
//! - `SettingsStore` — payout address per wallet, in memory or in a sled database
//!   depending on `--storage`.
//! - `RateQuoteGenerator` — synthetic exchange quotes, optionally failing at random
//!   when started with `--inject-failures`.
//! - the axum router from `monetizer_server::routes`.
//!
//! Shutdown: Ctrl+C stops accepting connections and lets in-flight requests finish.
use clap::Parser;
use log::{error, info};
use monetizer_common::MonetizerError;
use monetizer_common::Result;
use monetizer_server::model::quote_generator::FailurePolicy;
use monetizer_server::{AppState, ServerConfig, create_routes};

#[tokio::main]
async fn main() -> Result<(), MonetizerError> {
    init_logger();
    let config = ServerConfig::parse();

    let state = AppState::from_config(&config).inspect_err(|e| {
        error!("Failed to start: {}", e);
    })?;
    match state.quotes.failure_policy() {
        FailurePolicy::Inject { probability } => {
            info!("Rate failure injection enabled (p = {})", probability)
        }
        FailurePolicy::Disabled => info!("Rate failure injection disabled"),
    }

    let app = create_routes(state);
    let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Ctrl+C received. Shutting down server...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
