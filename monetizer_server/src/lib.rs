//! Crypto Monetizer backend.
//!
//! Serves per-wallet payout settings and a synthetic exchange rate comparison
//! over HTTP:
//!
//! - `store` — the settings store contract and its memory/sled/unconfigured profiles.
//! - `model::quote_generator` — synthetic quotes with an optional failure policy.
//! - `routes` — axum router wiring both into the `/api` surface.
//! - `config` — command-line/environment configuration.
//! - `error` — HTTP rendering of `MonetizerError`.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use routes::create_routes;
pub use state::AppState;
