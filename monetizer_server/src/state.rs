//! Shared application state handed to every handler.
use crate::config::ServerConfig;
use crate::model::quote_generator::{FailurePolicy, RateQuoteGenerator};
use crate::store::{self, SettingsStoreRef};
use monetizer_common::Result;
use std::sync::Arc;

/// Store and quote generator shared by every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Settings backend selected at startup.
    pub store: SettingsStoreRef,
    /// Quote source for the rates endpoint.
    pub quotes: Arc<RateQuoteGenerator>,
}

impl AppState {
    /// Wraps an already opened store and a generator.
    pub fn new(store: SettingsStoreRef, quotes: RateQuoteGenerator) -> Self {
        Self {
            store,
            quotes: Arc::new(quotes),
        }
    }

    /// Opens the configured store and builds the generator for the configured
    /// failure policy.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let store = store::open_store(config)?;
        let policy = if config.inject_failures {
            FailurePolicy::Inject {
                probability: config.failure_rate,
            }
        } else {
            FailurePolicy::Disabled
        };
        Ok(Self::new(store, RateQuoteGenerator::new(policy)))
    }
}
