//! Monetizer Client — a command-line front end for the monetizer API. It reads and
//! saves a wallet's payout address, prints the exchange rate comparison with a
//! payout preview, lists supported tokens and runs the simulated monetization
//! sequence.
//!
//! Usage example (CLI):
//! ```bash
//! monetizer_client settings set --wallet 0xABC --payout 0xDEF
//! monetizer_client monetize --wallet 0xABC --amount 1.5
//! ```
//!
//! The `executing` and `success` phases of `monetize` are simulated; nothing is
//! traded or transferred. Ctrl+C during a run cancels it, including while the
//! quotes are still being fetched.
#![warn(missing_docs)]
mod api;
mod args;
mod sequencer;
mod timer;

use crate::api::ApiClient;
use crate::args::{Args, Command, SettingsAction};
use crate::sequencer::{MonetizationSession, MonetizeOutcome, Phase, PhaseTimings, Sequencer};
use chrono::Local;
use clap::Parser;
use crossbeam_channel::{bounded, select};
use log::{error, info, warn};
use monetizer_common::exchange::BASE_ASSET_REFERENCE_PRICE;
use monetizer_common::{ExchangeQuote, MonetizerError, Result};
use std::time::Duration;

fn main() -> Result<(), MonetizerError> {
    init_logger();
    let args = Args::parse();
    let client = ApiClient::new(&args.server, Duration::from_secs(args.timeout_secs))?;

    let result = match args.command {
        Command::Settings { action } => run_settings(&client, action),
        Command::Rates { symbol, amount } => client
            .get_rates(&symbol)
            .map(|quotes| print_comparison(&quotes, amount)),
        Command::Tokens { chain_id } => run_tokens(&client, chain_id),
        Command::Monetize {
            wallet,
            amount,
            symbol,
        } => run_monetize(client, &wallet, amount, &symbol),
    };

    if let Err(e) = &result {
        error!("{}", e);
        if e.is_retryable() {
            info!("This error is temporary, please try again.");
        }
    }
    result
}

fn run_settings(client: &ApiClient, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Get { wallet } => {
            let record = client.get_settings(&wallet)?;
            if record.has_payout_address() {
                println!("{} -> {}", record.wallet_address, record.payout_address);
            } else {
                println!("{} has no payout address configured", record.wallet_address);
            }
        }
        SettingsAction::Set { wallet, payout } => {
            client.save_settings(&wallet, &payout)?;
            info!("Payout address saved for {}", wallet);
        }
    }
    Ok(())
}

fn run_tokens(client: &ApiClient, chain_id: u64) -> Result<()> {
    let tokens = client.get_tokens(chain_id)?;
    if tokens.is_empty() {
        info!("No supported tokens on chain {}", chain_id);
    }
    for token in tokens {
        println!(
            "{:<12} {:<44} ${}",
            token.symbol.to_string(),
            token.contract_address.as_deref().unwrap_or("-"),
            token.reference_price
        );
    }
    Ok(())
}

fn run_monetize(client: ApiClient, wallet: &str, amount: f64, symbol: &str) -> Result<()> {
    let settings = client.get_settings(wallet)?;
    let session = MonetizationSession::new();
    let phases = session.subscribe();
    let sequencer = Sequencer::new(client, symbol, PhaseTimings::default());

    let (interrupt_tx, interrupt_rx) = bounded::<()>(1);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = interrupt_tx.try_send(());
    }) {
        warn!("Ctrl+C handler not installed: {}", e);
    }

    let outcome = match sequencer.monetize_interruptible(
        &session,
        &settings.payout_address,
        amount,
        &interrupt_rx,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(message) = session.last_error() {
                println!("Monetization failed: {}", message);
            }
            return Err(e);
        }
    };
    match outcome {
        MonetizeOutcome::PayoutAddressRequired => {
            warn!("No payout address configured for {}.", wallet);
            println!(
                "Configure one first: monetizer_client settings set --wallet {} --payout <address>",
                wallet
            );
            return Ok(());
        }
        MonetizeOutcome::Cancelled => return Ok(()),
        MonetizeOutcome::Started => {}
    }

    print_comparison(&session.quotes(), amount);
    loop {
        select! {
            recv(phases) -> msg => match msg {
                Ok(phase) => {
                    println!("[{}] {}", Local::now().format("%H:%M:%S"), phase);
                    if phase == Phase::Success {
                        println!(
                            "Simulated payout of {} {} to {} complete. No funds were moved.",
                            session.amount().unwrap_or(amount),
                            symbol,
                            settings.payout_address
                        );
                        break;
                    }
                    if phase == Phase::Idle {
                        break;
                    }
                }
                Err(_) => break,
            },
            recv(interrupt_rx) -> _ => {
                info!("Ctrl+C received. Cancelling monetization...");
                session.cancel();
                break;
            }
        }
    }
    Ok(())
}

fn print_comparison(quotes: &[ExchangeQuote], amount: f64) {
    println!(
        "{:<10} {:>10} {:>8} {:>12} {:>14}",
        "Exchange", "Rate", "Fee", "Fee (USD)", "You get (USD)"
    );
    for quote in quotes {
        let estimate = quote.estimate(amount, BASE_ASSET_REFERENCE_PRICE);
        println!(
            "{:<10} {:>10.5} {:>7.2}% {:>12.2} {:>14.2}",
            quote.name.to_string(),
            quote.rate,
            quote.fee * 100.0,
            estimate.fee,
            estimate.net
        );
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
