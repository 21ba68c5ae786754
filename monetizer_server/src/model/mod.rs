//! Domain models for the monetizer server.
//!
//! - `quote_generator` — synthetic exchange rate quotes and the failure policy.

pub mod quote_generator;
