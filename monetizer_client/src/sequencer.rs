//! Monetization sequencer.
//!
//! A run moves a `MonetizationSession` through `idle → comparing → executing →
//! success`. Entering `comparing` fetches quotes; once they arrive the remaining
//! phases are purely timer-driven and involve no backend call. Executing and
//! success are simulated: no swap or transfer is ever performed.
//!
//! Each run carries an epoch. `cancel` bumps it and drops the pending timer, so a
//! timer or quote response belonging to an older run can never move the session.
//! The next timer is always scheduled from inside the phase it follows, which
//! keeps the order of transitions fixed.
use crate::timer::{self, TaskHandle};
use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use log::{debug, info, warn};
use monetizer_common::{ExchangeQuote, MonetizerError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use strum_macros::Display;

/// Phase of a monetization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Idle,
    Comparing,
    Executing,
    Success,
}

/// Anything that can produce a quote list for a symbol.
pub trait QuoteSource {
    fn fetch_quotes(&self, symbol: &str) -> Result<Vec<ExchangeQuote>>;
}

/// Delays between the timer-driven phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Time spent in `comparing` after quotes arrived.
    pub comparing: Duration,
    /// Time spent in `executing`.
    pub executing: Duration,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            comparing: Duration::from_secs(2),
            executing: Duration::from_secs(3),
        }
    }
}

/// How a `monetize` request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonetizeOutcome {
    /// Quotes arrived and the timed phases are scheduled.
    Started,
    /// No payout address is configured; nothing changed.
    PayoutAddressRequired,
    /// The session was cancelled while quotes were being fetched.
    Cancelled,
}

struct SessionState {
    phase: Phase,
    amount: Option<f64>,
    quotes: Vec<ExchangeQuote>,
    last_error: Option<String>,
    epoch: u64,
    pending: Option<TaskHandle>,
    listeners: Vec<Sender<Phase>>,
}

impl SessionState {
    fn enter(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        debug!("Phase {} -> {}", self.phase, phase);
        self.phase = phase;
        self.listeners.retain(|tx| tx.send(phase).is_ok());
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Comparing | Phase::Executing)
    }
}

/// Client-held state of monetization runs.
///
/// Dropping the session cancels any pending transition.
pub struct MonetizationSession {
    shared: Arc<Mutex<SessionState>>,
}

impl Default for MonetizationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MonetizationSession {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(SessionState {
                phase: Phase::Idle,
                amount: None,
                quotes: Vec::new(),
                last_error: None,
                epoch: 0,
                pending: None,
                listeners: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.shared)
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Amount of the current or last run.
    pub fn amount(&self) -> Option<f64> {
        self.lock().amount
    }

    /// Quotes fetched by the current or last run, best rate first.
    pub fn quotes(&self) -> Vec<ExchangeQuote> {
        self.lock().quotes.clone()
    }

    /// Message of the last failed run, cleared when a new run starts.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Receives every phase entered from now on.
    pub fn subscribe(&self) -> Receiver<Phase> {
        let (tx, rx) = unbounded();
        self.lock().listeners.push(tx);
        rx
    }

    /// Invalidates the in-flight run and returns to idle.
    pub fn cancel(&self) {
        let mut state = self.lock();
        state.epoch += 1;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }
        if state.phase != Phase::Idle {
            info!("Monetization cancelled during {}", state.phase);
        }
        state.enter(Phase::Idle);
    }
}

impl Drop for MonetizationSession {
    fn drop(&mut self) {
        let mut state = self.lock();
        state.epoch += 1;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }
    }
}

fn lock_state(shared: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Schedules the first of `steps`; each step schedules the next when it fires.
fn schedule_steps(
    shared: Arc<Mutex<SessionState>>,
    epoch: u64,
    mut steps: VecDeque<(Duration, Phase)>,
) -> Option<TaskHandle> {
    let (delay, phase) = steps.pop_front()?;
    Some(timer::schedule(delay, move || {
        let mut state = lock_state(&shared);
        if state.epoch != epoch {
            return;
        }
        state.enter(phase);
        state.pending = schedule_steps(Arc::clone(&shared), epoch, steps);
    }))
}

/// Drives monetization runs against a quote source.
pub struct Sequencer<S: QuoteSource> {
    source: S,
    symbol: String,
    timings: PhaseTimings,
}

impl<S: QuoteSource> Sequencer<S> {
    pub fn new(source: S, symbol: &str, timings: PhaseTimings) -> Self {
        Self {
            source,
            symbol: symbol.to_string(),
            timings,
        }
    }

    /// Starts a run for `amount` units paid out to `payout_address`.
    ///
    /// Blocks while quotes are fetched. On failure the session is back in idle,
    /// the message is kept in `last_error` and the error is returned.
    pub fn monetize(
        &self,
        session: &MonetizationSession,
        payout_address: &str,
        amount: f64,
    ) -> Result<MonetizeOutcome> {
        if payout_address.trim().is_empty() {
            info!("No payout address configured, monetization refused");
            return Ok(MonetizeOutcome::PayoutAddressRequired);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(MonetizerError::Validation(format!(
                "amount must be a positive number, got {}",
                amount
            )));
        }

        let epoch = {
            let mut state = session.lock();
            if state.is_running() {
                return Err(MonetizerError::Validation(
                    "A monetization is already in progress".to_string(),
                ));
            }
            state.epoch += 1;
            state.amount = Some(amount);
            state.quotes.clear();
            state.last_error = None;
            state.enter(Phase::Comparing);
            state.epoch
        };

        let fetched = self.source.fetch_quotes(&self.symbol);

        let mut state = session.lock();
        if state.epoch != epoch {
            debug!("Quotes arrived for a cancelled run, ignoring");
            return Ok(MonetizeOutcome::Cancelled);
        }
        match fetched {
            Ok(quotes) => {
                info!("Received {} quotes for {}", quotes.len(), self.symbol);
                state.quotes = quotes;
                let steps = VecDeque::from([
                    (self.timings.comparing, Phase::Executing),
                    (self.timings.executing, Phase::Success),
                ]);
                state.pending = schedule_steps(Arc::clone(&session.shared), epoch, steps);
                Ok(MonetizeOutcome::Started)
            }
            Err(e) => {
                warn!("Failed to fetch rates: {}", e);
                state.last_error = Some(e.message());
                state.enter(Phase::Idle);
                Err(e)
            }
        }
    }
}

impl<S: QuoteSource + Sync> Sequencer<S> {
    /// `monetize` on a scoped thread. A message on `interrupt` cancels the
    /// session right away, even while quotes are still being fetched; the fetch
    /// is then left to finish and its result discarded.
    pub fn monetize_interruptible(
        &self,
        session: &MonetizationSession,
        payout_address: &str,
        amount: f64,
        interrupt: &Receiver<()>,
    ) -> Result<MonetizeOutcome> {
        thread::scope(|scope| {
            let (done_tx, done_rx) = bounded(1);
            scope.spawn(move || {
                let _ = done_tx.send(self.monetize(session, payout_address, amount));
            });
            select! {
                recv(done_rx) -> outcome => outcome.unwrap_or_else(|_| Err(worker_stopped())),
                recv(interrupt) -> _ => {
                    info!("Interrupted, cancelling monetization");
                    session.cancel();
                    done_rx.recv().unwrap_or_else(|_| Err(worker_stopped()))
                }
            }
        })
    }
}

fn worker_stopped() -> MonetizerError {
    MonetizerError::Transport("Monetization worker stopped unexpectedly".to_string())
}
