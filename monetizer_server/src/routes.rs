//! HTTP routes.
//!
//! - `GET  /api/settings/{address}` — settings for a wallet, default when absent.
//! - `POST /api/settings` — upsert a wallet's payout address.
//! - `GET  /api/rates/{symbol}` — synthetic quotes, best rate first.
//! - `GET  /api/tokens/{chain_id}` — supported token catalog for a chain.
//! - `GET  /health` — liveness.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post},
};
use log::{debug, info};
use monetizer_common::settings::{SettingsUpdate, SuccessResponse};
use monetizer_common::tokens::{Token, tokens_for_chain};
use monetizer_common::{ExchangeQuote, SettingsRecord};
use serde::Serialize;

/// Create the router with all API endpoints.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/settings/{address}", get(get_settings))
        .route("/api/settings", post(upsert_settings))
        .route("/api/rates/{symbol}", get(get_rates))
        .route("/api/tokens/{chain_id}", get(get_tokens))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn get_settings(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<SettingsRecord>> {
    let Path(address) = address?;
    debug!("Settings requested for {}", address);
    let record = state.store.get_settings(&address)?;
    Ok(Json(record))
}

async fn upsert_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(update) = payload?;
    let wallet = update.wallet_address.clone();
    state.store.upsert_settings(update)?;
    info!("Settings saved for {}", wallet);
    Ok(Json(SuccessResponse::ok()))
}

async fn get_rates(
    State(state): State<AppState>,
    symbol: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<ExchangeQuote>>> {
    let Path(symbol) = symbol?;
    let quotes = state.quotes.quotes(&symbol)?;
    Ok(Json(quotes))
}

async fn get_tokens(
    chain_id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Vec<Token>>> {
    let Path(chain_id) = chain_id?;
    Ok(Json(tokens_for_chain(chain_id)))
}
