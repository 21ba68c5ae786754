//!
//! Common types and utilities shared by the monetizer server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `MonetizerError` and its wire body.
//! - `result` — handy `Result<T, MonetizerError>` alias.
//! - `exchange` — exchange identities, fees and quotes.
//! - `settings` — settings records and request/response payloads.
//! - `tokens` — the supported token catalog.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod exchange;
pub mod net;
pub mod result;
pub mod settings;
pub mod tokens;

pub use error::MonetizerError;
pub use exchange::{Exchange, ExchangeQuote};
pub use result::Result;
pub use settings::SettingsRecord;
