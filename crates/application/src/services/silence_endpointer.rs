//! Silence endpointer - Decides that the candidate stopped talking
//!
//! A single-slot delay timer: every transcript update re-arms it, and when the
//! quiet interval passes without another update the owner is told to close
//! the turn.

use std::{fmt, sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::trace;

/// Quiet interval after which a turn is considered finished
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(2000);

type ElapsedCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Cancellable, resettable silence timer
///
/// At most one timer is pending at any time. Each arm gets a generation
/// number that is passed to the callback; the owner confirms a firing with
/// [`SilenceEndpointer::take_fired`], which rejects firings from timers that
/// were replaced or cancelled after their callback was already queued.
pub struct SilenceEndpointer {
    quiet_interval: Duration,
    on_elapsed: ElapsedCallback,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl fmt::Debug for SilenceEndpointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SilenceEndpointer")
            .field("quiet_interval", &self.quiet_interval)
            .field("generation", &self.generation)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl SilenceEndpointer {
    /// Create an endpointer that calls `on_elapsed` with the timer generation
    pub fn new(quiet_interval: Duration, on_elapsed: impl Fn(u64) + Send + Sync + 'static) -> Self {
        Self {
            quiet_interval,
            on_elapsed: Arc::new(on_elapsed),
            generation: 0,
            pending: None,
        }
    }

    /// Cancel any pending timer and start a fresh one
    ///
    /// Returns the generation of the new timer.
    pub fn reset(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let interval = self.quiet_interval;
        let on_elapsed = Arc::clone(&self.on_elapsed);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            on_elapsed(generation);
        }));

        trace!(generation, "Silence timer armed");
        generation
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            trace!(generation = self.generation, "Silence timer cancelled");
        }
    }

    /// Confirm that the timer of `generation` fired and is still the live one
    ///
    /// Consumes the slot on success, so a generation is accepted at most once.
    pub fn take_fired(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.pending.is_some() {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether a timer is currently counting down
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Configured quiet interval
    pub const fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }
}

impl Drop for SilenceEndpointer {
    fn drop(&mut self) {
        self.cancel();
    }
}
