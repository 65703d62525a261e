//! Search input debouncing.
//!
//! Two flavors share one rule: every new value restarts the quiet period,
//! and only the last value is released once the period elapses.
//!
//! - [`Debounce`] is a clock-driven state machine. The caller passes `now`
//!   in, which keeps the presenter free of timers.
//! - [`SearchDebouncer`] runs the same rule on a tokio task for hosts that
//!   already live on a runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Clock-driven debounce of a single pending value.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the pending value and restarts the quiet period at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Releases the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drops the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// `true` while a value is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

/// Debounces search terms on a background tokio task.
///
/// Settled terms arrive on the receiver returned by [`SearchDebouncer::spawn`].
/// Dropping the debouncer aborts the task; a term still inside its quiet
/// period is discarded.
///
/// # Example
///
/// ```ignore
/// let (debouncer, mut settled) = SearchDebouncer::spawn(Duration::from_millis(300));
/// debouncer.input("wor");
/// debouncer.input("worker");
/// assert_eq!(settled.recv().await.as_deref(), Some("worker"));
/// ```
#[derive(Debug)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Starts the debounce task on the current runtime.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(delay, input_rx, settled_tx));
        (
            Self {
                input: input_tx,
                task,
            },
            settled_rx,
        )
    }

    /// Feeds a keystroke's value. Restarts the quiet period.
    pub fn input(&self, term: impl Into<String>) {
        if self.input.send(term.into()).is_err() {
            log::warn!("search debouncer task is gone, dropping input");
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    settled: mpsc::UnboundedSender<String>,
) {
    let mut pending: Option<String> = None;
    loop {
        match pending.take() {
            None => match input.recv().await {
                Some(term) => pending = Some(term),
                None => break,
            },
            Some(term) => {
                tokio::select! {
                    next = input.recv() => match next {
                        Some(next) => pending = Some(next),
                        None => break,
                    },
                    _ = tokio::time::sleep(delay) => {
                        log::trace!("search settled on {term:?}");
                        if settled.send(term).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}
