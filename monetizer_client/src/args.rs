//! Command-line arguments for the Monetizer Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the monetizer API.
    #[clap(long, env = "MONETIZER_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Upper bound for each HTTP request, in seconds.
    #[clap(long, env = "MONETIZER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Client actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read or write the payout address of a wallet.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Compare exchange rates for a symbol.
    Rates {
        /// Asset symbol.
        #[clap(long, default_value = "ETH")]
        symbol: String,
        /// Amount used for the payout preview.
        #[clap(long, default_value_t = 1.0)]
        amount: f64,
    },
    /// List supported tokens on a chain.
    Tokens {
        /// Chain id (1 = Ethereum, 56 = BSC).
        #[clap(long, default_value_t = 1)]
        chain_id: u64,
    },
    /// Run the simulated monetization sequence for a wallet.
    Monetize {
        /// Connected wallet address.
        #[clap(long)]
        wallet: String,
        /// Amount of the base asset to monetize.
        #[clap(long, default_value_t = 1.0)]
        amount: f64,
        /// Asset symbol to quote.
        #[clap(long, default_value = "ETH")]
        symbol: String,
    },
}

/// Settings subcommands.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show the stored payout address.
    Get {
        /// Wallet address.
        #[clap(long)]
        wallet: String,
    },
    /// Save a payout address.
    Set {
        /// Wallet address.
        #[clap(long)]
        wallet: String,
        /// Destination for proceeds.
        #[clap(long)]
        payout: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monetize_defaults() {
        let args = Args::try_parse_from(["monetizer_client", "monetize", "--wallet", "0xABC"])
            .unwrap();
        assert_eq!(args.timeout_secs, 10);
        match args.command {
            Command::Monetize {
                wallet,
                amount,
                symbol,
            } => {
                assert_eq!(wallet, "0xABC");
                assert_eq!(amount, 1.0);
                assert_eq!(symbol, "ETH");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn settings_set_requires_payout() {
        assert!(
            Args::try_parse_from(["monetizer_client", "settings", "set", "--wallet", "0xABC"])
                .is_err()
        );
    }
}
