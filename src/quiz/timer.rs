//! Delayed auto-advance
//!
//! One-shot, cancellable timer that delivers an [`AdvanceToken`] to the
//! app loop after the reveal delay.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::session::AdvanceToken;

/// Default pause between revealing an answer and moving on
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Schedules at most one pending advance at a time
#[derive(Debug)]
pub struct AdvanceTimer {
    delay: Duration,
    tx: mpsc::Sender<AdvanceToken>,
    pending: Option<(AdvanceToken, JoinHandle<()>)>,
}

impl AdvanceTimer {
    /// Create a timer delivering tokens on `tx`
    pub fn new(delay: Duration, tx: mpsc::Sender<AdvanceToken>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Schedule `token`, replacing any pending one. Must run inside a tokio runtime.
    pub fn schedule(&mut self, token: AdvanceToken) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(token).await;
        });
        tracing::trace!(?token, delay = %humantime::format_duration(delay), "advance scheduled");
        self.pending = Some((token, handle));
    }

    /// Abort the pending advance, if any
    pub fn cancel(&mut self) {
        if let Some((token, handle)) = self.pending.take() {
            handle.abort();
            tracing::trace!(?token, "advance cancelled");
        }
    }

    /// Clear the pending slot once `token` has been delivered
    pub fn settle(&mut self, token: AdvanceToken) {
        if matches!(self.pending, Some((pending, _)) if pending == token) {
            self.pending = None;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for AdvanceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
