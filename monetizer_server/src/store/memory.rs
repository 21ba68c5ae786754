//! Process-local settings backend. Contents are lost on restart.
use super::SettingsStore;
use monetizer_common::{Result, SettingsRecord};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory settings keyed by wallet address.
#[derive(Default)]
pub struct InMemorySettingsStore {
    records: RwLock<HashMap<String, String>>,
}

impl InMemorySettingsStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self, wallet_address: &str) -> Result<Option<SettingsRecord>> {
        let records = self.records.read()?;
        Ok(records.get(wallet_address).map(|payout| SettingsRecord {
            wallet_address: wallet_address.to_string(),
            payout_address: payout.clone(),
        }))
    }

    fn upsert(&self, record: SettingsRecord) -> Result<()> {
        let mut records = self.records.write()?;
        records.insert(record.wallet_address, record.payout_address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monetizer_common::settings::SettingsUpdate;

    #[test]
    fn unknown_wallet_gets_empty_payout() {
        let store = InMemorySettingsStore::new();
        let record = store.get_settings("0xNEW").unwrap();
        assert_eq!(record.payout_address, "");
        assert!(store.load("0xNEW").unwrap().is_none());
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let store = InMemorySettingsStore::new();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "0xDEF"))
            .unwrap();
        let record = store.get_settings("0xABC").unwrap();
        assert_eq!(record.wallet_address, "0xABC");
        assert_eq!(record.payout_address, "0xDEF");
    }

    #[test]
    fn repeated_upsert_is_idempotent() {
        let store = InMemorySettingsStore::new();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "0xDEF"))
            .unwrap();
        let first = store.get_settings("0xABC").unwrap();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "0xDEF"))
            .unwrap();
        assert_eq!(store.get_settings("0xABC").unwrap(), first);
    }

    #[test]
    fn last_write_wins() {
        let store = InMemorySettingsStore::new();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "first"))
            .unwrap();
        store
            .upsert_settings(SettingsUpdate::new("0xABC", "second"))
            .unwrap();
        assert_eq!(store.get_settings("0xABC").unwrap().payout_address, "second");
    }
}
