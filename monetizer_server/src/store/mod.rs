//! Settings persistence.
//!
//! `SettingsStore` is the single contract behind the settings endpoints. Backends
//! only implement `load` and `upsert`; the default-on-absence read and boundary
//! validation live in the provided methods so every profile behaves the same.
//!
//! - `memory` — `RwLock<HashMap>` kept in process.
//! - `sled` — embedded database on disk.
//! - unconfigured — selected when the sled profile has no database path. Reads
//!   return the default record, writes fail with a configuration error.

pub mod memory;
pub mod sled_store;

use crate::config::{ServerConfig, StorageProfile};
use log::{info, warn};
use monetizer_common::settings::SettingsUpdate;
use monetizer_common::{MonetizerError, Result, SettingsRecord};
use std::sync::Arc;

pub use memory::InMemorySettingsStore;
pub use sled_store::SledSettingsStore;

/// Read/upsert access to per-wallet settings. Last write wins.
pub trait SettingsStore: Send + Sync {
    /// Returns the stored record, `None` when the wallet never saved settings.
    fn load(&self, wallet_address: &str) -> Result<Option<SettingsRecord>>;

    /// Inserts the record or overwrites the payout address of an existing one.
    fn upsert(&self, record: SettingsRecord) -> Result<()>;

    /// Reads settings, falling back to an unsaved zero-value record.
    fn get_settings(&self, wallet_address: &str) -> Result<SettingsRecord> {
        Ok(self
            .load(wallet_address)?
            .unwrap_or_else(|| SettingsRecord::default_for(wallet_address)))
    }

    /// Validates and stores a payout address for a wallet.
    fn upsert_settings(&self, update: SettingsUpdate) -> Result<()> {
        let record = update.validate()?;
        self.upsert(record)
    }
}

/// Shared handle used by the HTTP layer.
pub type SettingsStoreRef = Arc<dyn SettingsStore>;

/// Store for a profile whose backing connection was never configured.
pub struct UnconfiguredSettingsStore {
    reason: String,
}

impl UnconfiguredSettingsStore {
    /// `reason` is reported to clients on every write.
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl SettingsStore for UnconfiguredSettingsStore {
    fn load(&self, _wallet_address: &str) -> Result<Option<SettingsRecord>> {
        Ok(None)
    }

    fn upsert(&self, _record: SettingsRecord) -> Result<()> {
        Err(MonetizerError::Configuration(self.reason.clone()))
    }
}

/// Builds the store selected by `config`.
pub fn open_store(config: &ServerConfig) -> Result<SettingsStoreRef> {
    match (config.storage, &config.db_path) {
        (StorageProfile::Memory, _) => {
            info!("Settings store: in-memory");
            Ok(Arc::new(InMemorySettingsStore::new()))
        }
        (StorageProfile::Sled, Some(path)) => {
            let store = SledSettingsStore::open(path)?;
            info!("Settings store: sled at {}", store.path());
            Ok(Arc::new(store))
        }
        (StorageProfile::Sled, None) => {
            warn!("Settings store: sled profile selected without --db-path, writes are disabled");
            Ok(Arc::new(UnconfiguredSettingsStore::new(
                "Settings database is not configured. Set MONETIZER_DB_PATH and restart the server.",
            )))
        }
    }
}
