//! Settings payloads exchanged between client and server.
//!
//! A `SettingsRecord` maps a wallet address to the payout address where simulated
//! proceeds would be sent. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::error::MonetizerError;

/// Stored settings for one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    /// Wallet the settings belong to. Unique key.
    pub wallet_address: String,
    /// Free-form payout destination. Empty when not configured.
    #[serde(default)]
    pub payout_address: String,
}

impl SettingsRecord {
    /// Zero-value record returned for wallets that never saved settings.
    pub fn default_for(wallet_address: &str) -> Self {
        SettingsRecord {
            wallet_address: wallet_address.to_string(),
            payout_address: String::new(),
        }
    }

    /// Whether a payout destination has been configured.
    pub fn has_payout_address(&self) -> bool {
        !self.payout_address.trim().is_empty()
    }
}

/// Body of `POST /api/settings`.
///
/// `payoutAddress` is optional and defaults to an empty string. The payout
/// format is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    /// Wallet whose settings are being written. Must be non-empty.
    pub wallet_address: String,
    /// New payout destination.
    #[serde(default)]
    pub payout_address: String,
}

impl SettingsUpdate {
    /// Creates an update request.
    pub fn new(wallet_address: &str, payout_address: &str) -> Self {
        SettingsUpdate {
            wallet_address: wallet_address.to_string(),
            payout_address: payout_address.to_string(),
        }
    }

    /// Checks the request at the boundary and turns it into a record.
    pub fn validate(self) -> Result<SettingsRecord, MonetizerError> {
        if self.wallet_address.trim().is_empty() {
            return Err(MonetizerError::Validation(
                "walletAddress must not be empty".to_string(),
            ));
        }
        Ok(SettingsRecord {
            wallet_address: self.wallet_address,
            payout_address: self.payout_address,
        })
    }
}

/// Body returned by successful writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

impl SuccessResponse {
    /// The only value the server sends.
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}
