//! Exchange identities and the quotes they produce.
//!
//! The set of exchanges is fixed; each carries a constant fee fraction. An
//! `ExchangeQuote` pairs an exchange with a rate generated for a single request.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Reference USD price of the base asset used for payout previews.
pub const BASE_ASSET_REFERENCE_PRICE: f64 = 2500.0;

/// Exchanges quoted by the rate generator.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Exchange {
    /// Binance spot.
    Binance,
    /// Coinbase.
    Coinbase,
    /// Kraken.
    Kraken,
    /// OKX.
    #[allow(clippy::upper_case_acronyms)]
    OKX,
    /// KuCoin.
    Kucoin,
    /// 1inch aggregator.
    #[serde(rename = "1inch")]
    #[strum(serialize = "1inch")]
    OneInch,
}

impl Exchange {
    /// Fee charged by the exchange as a fraction of the traded value.
    pub fn fee(&self) -> f64 {
        match self {
            Exchange::Binance => 0.001,
            Exchange::Coinbase => 0.005,
            Exchange::Kraken => 0.002,
            Exchange::OKX => 0.001,
            Exchange::Kucoin => 0.001,
            Exchange::OneInch => 0.0005,
        }
    }

    /// All exchanges in declaration order.
    pub fn all() -> Vec<Exchange> {
        Exchange::iter().collect()
    }
}

/// A single exchange's synthetic price for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    /// Exchange the quote comes from.
    pub name: Exchange,
    /// Price of one unit of the base asset, relative to the base price.
    pub rate: f64,
    /// Fee fraction in `[0, 1)`.
    pub fee: f64,
}

/// What a quote would pay out for a given amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutEstimate {
    /// Value before fees.
    pub gross: f64,
    /// Value taken by the exchange.
    pub fee: f64,
    /// Value left after fees.
    pub net: f64,
}

impl ExchangeQuote {
    /// Builds a quote for `exchange` at `rate`, attaching the exchange's fixed fee.
    pub fn new(exchange: Exchange, rate: f64) -> Self {
        ExchangeQuote {
            name: exchange,
            rate,
            fee: exchange.fee(),
        }
    }

    /// Estimates the payout for `amount` units of the base asset priced at
    /// `reference_price`.
    pub fn estimate(&self, amount: f64, reference_price: f64) -> PayoutEstimate {
        let gross = self.rate * reference_price * amount;
        PayoutEstimate {
            gross,
            fee: gross * self.fee,
            net: gross * (1.0 - self.fee),
        }
    }
}

/// Sorts quotes best price first.
pub fn sort_best_first(quotes: &mut [ExchangeQuote]) {
    quotes.sort_by(|a, b| b.rate.total_cmp(&a.rate));
}
