//! Server configuration.
//!
//! Every option can be given on the command line or through a `MONETIZER_*`
//! environment variable. `ServerConfig::validate` runs once at startup, before
//! any listener or store is opened.

use clap::{Parser, ValueEnum};
use monetizer_common::MonetizerError;
use monetizer_common::net::{API_PORT, addr};
use std::path::PathBuf;

/// Backend used by the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageProfile {
    /// Process-local map, lost on restart.
    Memory,
    /// Embedded sled database at `--db-path`.
    Sled,
}

/// Default probability of an injected rate-source failure.
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Parsed command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Crypto Monetizer settings and rates API", long_about = None)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[clap(long, env = "MONETIZER_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// HTTP port.
    #[clap(long, env = "MONETIZER_PORT", default_value_t = API_PORT)]
    pub port: u16,

    /// Settings storage backend.
    #[clap(long, env = "MONETIZER_STORAGE", value_enum, default_value_t = StorageProfile::Memory)]
    pub storage: StorageProfile,

    /// Database directory for the sled backend. Without it the sled profile
    /// starts unconfigured and rejects writes.
    #[clap(long, env = "MONETIZER_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Make the rates endpoint fail at random, for resilience testing.
    #[clap(long, env = "MONETIZER_INJECT_FAILURES")]
    pub inject_failures: bool,

    /// Probability of an injected failure per rates request.
    #[clap(long, env = "MONETIZER_FAILURE_RATE", default_value_t = DEFAULT_FAILURE_RATE)]
    pub failure_rate: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0".to_string(),
            port: API_PORT,
            storage: StorageProfile::Memory,
            db_path: None,
            inject_failures: false,
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

impl ServerConfig {
    /// Rejects values that would only fail later, deep inside a request.
    pub fn validate(&self) -> Result<(), MonetizerError> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(MonetizerError::Configuration(format!(
                "failure rate must be within [0, 1], got {}",
                self.failure_rate
            )));
        }
        if self.bind.trim().is_empty() {
            return Err(MonetizerError::Configuration(
                "bind address must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// `bind:port` string for the listener.
    pub fn listen_address(&self) -> String {
        addr(self.bind.trim(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_address(), "0.0.0.0:3000");
    }

    #[test]
    fn out_of_range_failure_rate_is_rejected() {
        let config = ServerConfig {
            failure_rate: 1.5,
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MonetizerError::Configuration(_))
        ));
    }

    #[test]
    fn parses_sled_profile_from_args() {
        let config = ServerConfig::try_parse_from([
            "monetizer_server",
            "--storage",
            "sled",
            "--db-path",
            "/tmp/monetizer",
            "--inject-failures",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(config.storage, StorageProfile::Sled);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/monetizer")));
        assert!(config.inject_failures);
        assert_eq!(config.port, 8080);
        assert_eq!(config.failure_rate, DEFAULT_FAILURE_RATE);
    }
}
