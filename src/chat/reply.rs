//! Simulated assistant replies.
//!
//! A reply is a one-shot timer task. When it fires it posts a [`ReplyTicket`]
//! back to the event loop, which hands it to [`ChatWidget::complete_reply`].
//! Every timer observes a child of the scheduler's lifetime token, so
//! cancelling the scheduler (or dropping it) turns outstanding timers into
//! no-ops.
//!
//! [`ChatWidget::complete_reply`]: super::ChatWidget::complete_reply

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Fixed reply content; no generation takes place.
pub const SIMULATED_REPLY: &str = "Processing your query using merged checkpoints from our \
contributor network. Once your IPFS and blockchain integration is complete, responses will be \
generated from the latest community-trained model.";

/// Default latency before the simulated reply lands.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Identifies one scheduled reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket(pub u64);

/// Schedules delayed replies and delivers their tickets over a channel.
#[derive(Debug)]
pub struct ReplyScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<ReplyTicket>,
    lifetime: CancellationToken,
    next_ticket: u64,
}

impl ReplyScheduler {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<ReplyTicket>) -> Self {
        Self {
            delay,
            tx,
            lifetime: CancellationToken::new(),
            next_ticket: 0,
        }
    }

    /// Create a scheduler together with the receiver its tickets arrive on.
    pub fn channel(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ReplyTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(delay, tx), rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a reply timer.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn schedule(&mut self) -> ReplyTicket {
        self.next_ticket += 1;
        let ticket = ReplyTicket(self.next_ticket);
        let token = self.lifetime.child_token();
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tracing::debug!(ticket = ticket.0, "Reply timer cancelled before firing");
                }
                _ = tokio::time::sleep(delay) => {
                    if tx.send(ticket).is_err() {
                        tracing::debug!(ticket = ticket.0, "Reply receiver gone, dropping reply");
                    }
                }
            }
        });

        tracing::debug!(ticket = ticket.0, delay_ms = delay.as_millis() as u64, "Scheduled reply");
        ticket
    }

    /// Abort every outstanding timer. Later schedules are cancelled immediately.
    pub fn cancel_all(&self) {
        self.lifetime.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.lifetime.is_cancelled()
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
