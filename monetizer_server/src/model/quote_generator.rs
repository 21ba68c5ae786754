//! Synthetic exchange rate quotes.
//!
//! `RateQuoteGenerator` stands in for real exchange price feeds. For every request
//! it draws a fresh rate per exchange with a small uniform deviation around the
//! base price, attaches the exchange's fixed fee and returns the list best price
//! first. Nothing is cached between requests.
//!
//! When a `FailurePolicy::Inject` is configured, each call independently fails with
//! `MonetizerError::ServiceUnavailable` at the given probability. The decision is
//! taken before any quote is drawn.
//!
//! All randomness comes from the caller-supplied `Rng`, so a seeded generator gives
//! a reproducible sequence.

use log::{debug, warn};
use monetizer_common::exchange::sort_best_first;
use monetizer_common::{Exchange, ExchangeQuote, MonetizerError, Result};
use rand::Rng;

/// Base price every rate deviates from.
pub const BASE_PRICE: f64 = 1.0;
/// Maximum relative deviation of a rate from the base price.
pub const MAX_DEVIATION: f64 = 0.01;

/// Whether the generator fails on purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailurePolicy {
    /// Always answer.
    Disabled,
    /// Fail each call with the given probability in `[0, 1]`.
    Inject {
        /// Chance of failure per call.
        probability: f64,
    },
}

/// Produces per-request quote lists for the fixed exchange set.
#[derive(Debug, Clone)]
pub struct RateQuoteGenerator {
    base_price: f64,
    failure: FailurePolicy,
}

impl Default for RateQuoteGenerator {
    fn default() -> Self {
        Self::new(FailurePolicy::Disabled)
    }
}

impl RateQuoteGenerator {
    /// Creates a generator around `BASE_PRICE`.
    pub fn new(failure: FailurePolicy) -> Self {
        Self {
            base_price: BASE_PRICE,
            failure,
        }
    }

    /// Active failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure
    }

    /// Calculate a synthetic rate around `base_price`.
    ///
    /// The change is sampled uniformly from `[-1%, +1%]`.
    pub fn next_rate<R: Rng>(base_price: f64, rng: &mut R) -> f64 {
        let change: f64 = rng.random_range(-MAX_DEVIATION..=MAX_DEVIATION);
        base_price * (1.0 + change)
    }

    /// Quotes for `symbol` using the thread-local RNG.
    pub fn quotes(&self, symbol: &str) -> Result<Vec<ExchangeQuote>> {
        self.quotes_with_rng(symbol, &mut rand::rng())
    }

    /// Quotes for `symbol`, sorted descending by rate, or an injected failure.
    pub fn quotes_with_rng<R: Rng>(
        &self,
        symbol: &str,
        rng: &mut R,
    ) -> Result<Vec<ExchangeQuote>> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MonetizerError::Validation(
                "symbol must not be empty".to_string(),
            ));
        }
        let symbol = symbol.to_uppercase();

        if let FailurePolicy::Inject { probability } = self.failure {
            if rng.random_bool(probability.clamp(0.0, 1.0)) {
                warn!("Injected rate source failure for {}", symbol);
                return Err(MonetizerError::ServiceUnavailable(
                    "Exchange rate service is temporarily unavailable. Please try again."
                        .to_string(),
                ));
            }
        }

        let mut quotes: Vec<ExchangeQuote> = Exchange::all()
            .into_iter()
            .map(|exchange| ExchangeQuote::new(exchange, Self::next_rate(self.base_price, rng)))
            .collect();
        sort_best_first(&mut quotes);

        debug!(
            "Generated {} quotes for {}, best {} at {:.5}",
            quotes.len(),
            symbol,
            quotes[0].name,
            quotes[0].rate
        );
        Ok(quotes)
    }
}
