//! Sled-backed settings persistence.
//!
//! Records live in the `user_settings` tree, keyed by `settings:<wallet>` and
//! encoded as JSON. Every upsert is flushed before returning.
use super::SettingsStore;
use monetizer_common::{MonetizerError, Result, SettingsRecord};
use std::path::Path;

const TREE: &str = "user_settings";

/// Settings kept in an on-disk sled database.
#[derive(Debug, Clone)]
pub struct SledSettingsStore {
    tree: sled::Tree,
    path: String,
}

impl SledSettingsStore {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = sled::open(&path)
            .map_err(|e| MonetizerError::Storage(format!("Failed to open database: {}", e)))?;
        let tree = db
            .open_tree(TREE)
            .map_err(|e| MonetizerError::Storage(format!("Failed to open settings tree: {}", e)))?;

        Ok(SledSettingsStore {
            tree,
            path: path_str,
        })
    }

    /// Get the database path
    pub fn path(&self) -> &str {
        &self.path
    }

    fn key(wallet_address: &str) -> String {
        format!("settings:{}", wallet_address)
    }
}

impl SettingsStore for SledSettingsStore {
    fn load(&self, wallet_address: &str) -> Result<Option<SettingsRecord>> {
        match self.tree.get(Self::key(wallet_address).as_bytes()) {
            Ok(Some(data)) => {
                let record = serde_json::from_slice(&data).map_err(|e| {
                    MonetizerError::Storage(format!("Failed to decode settings: {}", e))
                })?;
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(MonetizerError::Storage(format!(
                "Failed to load settings: {}",
                e
            ))),
        }
    }

    fn upsert(&self, record: SettingsRecord) -> Result<()> {
        let value = serde_json::to_vec(&record)?;

        self.tree
            .insert(Self::key(&record.wallet_address).as_bytes(), value)
            .map_err(|e| MonetizerError::Storage(format!("Failed to save settings: {}", e)))?;

        self.tree
            .flush()
            .map_err(|e| MonetizerError::Storage(format!("Failed to flush settings: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monetizer_common::settings::SettingsUpdate;

    #[test]
    fn settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SledSettingsStore::open(dir.path()).unwrap();
            store
                .upsert_settings(SettingsUpdate::new("0xABC", "0xDEF"))
                .unwrap();
        }
        let store = SledSettingsStore::open(dir.path()).unwrap();
        let record = store.get_settings("0xABC").unwrap();
        assert_eq!(record.wallet_address, "0xABC");
        assert_eq!(record.payout_address, "0xDEF");
    }

    #[test]
    fn overwrite_keeps_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path()).unwrap();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "one"))
            .unwrap();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "two"))
            .unwrap();
        assert_eq!(store.tree.len(), 1);
        assert_eq!(store.get_settings("0xABC").unwrap().payout_address, "two");
    }

    #[test]
    fn missing_wallet_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path()).unwrap();
        assert_eq!(store.get_settings("0xNEW").unwrap().payout_address, "");
        assert!(store.path().contains(&*dir.path().to_string_lossy()));
    }

    #[test]
    fn corrupt_value_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path()).unwrap();
        store
            .tree
            .insert(SledSettingsStore::key("0xBAD").as_bytes(), b"not json".to_vec())
            .unwrap();
        assert!(matches!(
            store.get_settings("0xBAD"),
            Err(MonetizerError::Storage(_))
        ));
    }
}
