//! Chat widget state and operations
//!
//! `ChatWidget` is the presentation-independent core of the chat UI. It owns
//! the transcript, the compose draft and the pending flag, and drives the
//! simulated reply through a [`ReplyScheduler`]. Both layout templates render
//! from the same instance.

use std::time::Duration;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use super::message::{ChatMessage, MessageId, MessageRole};
use super::reply::{ReplyScheduler, ReplyTicket, SIMULATED_REPLY};
use super::transcript::Transcript;

/// Display-only contributor count shown in the status bar.
pub const CONTRIBUTOR_COUNT: u32 = 42;

/// Whether the character limit is only displayed or also applied to the draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputLimitPolicy {
    /// Counter only; the draft is never truncated
    #[default]
    Advisory,
    /// Drafts longer than the limit are truncated on update
    Enforced,
}

/// Character limit for the compose field and how it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimit {
    pub max_chars: usize,
    pub policy: InputLimitPolicy,
}

impl InputLimit {
    pub fn advisory(max_chars: usize) -> Self {
        Self {
            max_chars,
            policy: InputLimitPolicy::Advisory,
        }
    }
}

/// Why a submission was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Draft is empty after trimming
    EmptyDraft,
    /// A simulated reply is still in flight
    ReplyPending,
}

/// Result of [`ChatWidget::submit_draft`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted {
        message: MessageId,
        ticket: ReplyTicket,
    },
    Rejected(RejectReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

/// What the host should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Enter without modifiers: submission was attempted and the newline suppressed
    Submit(SubmitOutcome),
    /// Enter with Shift or Alt: insert a literal newline into the text area
    InsertNewline,
    /// Not a submit key; forward to the text area
    PassThrough,
}

/// Chat component state
#[derive(Debug)]
pub struct ChatWidget {
    transcript: Transcript,
    draft_input: String,
    pending: Option<ReplyTicket>,
    contributor_count: u32,
    input_limit: InputLimit,
    replies: ReplyScheduler,
}

impl ChatWidget {
    /// Create a widget whose reply tickets are delivered on `reply_tx`.
    pub fn new(
        input_limit: InputLimit,
        reply_delay: Duration,
        reply_tx: mpsc::UnboundedSender<ReplyTicket>,
    ) -> Self {
        Self {
            transcript: Transcript::seeded(),
            draft_input: String::new(),
            pending: None,
            contributor_count: CONTRIBUTOR_COUNT,
            input_limit,
            replies: ReplyScheduler::new(reply_delay, reply_tx),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn draft(&self) -> &str {
        &self.draft_input
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn contributor_count(&self) -> u32 {
        self.contributor_count
    }

    pub fn input_limit(&self) -> InputLimit {
        self.input_limit
    }

    pub fn reply_delay(&self) -> Duration {
        self.replies.delay()
    }

    /// Draft length in characters, for the `n/limit` counter.
    pub fn draft_chars(&self) -> usize {
        self.draft_input.chars().count()
    }

    /// Whether the send control is enabled
    pub fn can_submit(&self) -> bool {
        !self.draft_input.trim().is_empty() && self.pending.is_none()
    }

    /// Replace the draft with `text`.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if self.input_limit.policy == InputLimitPolicy::Enforced {
            if let Some((byte_idx, _)) = text.char_indices().nth(self.input_limit.max_chars) {
                text.truncate(byte_idx);
            }
        }
        self.draft_input = text;
    }

    /// Append the trimmed draft as a user message and schedule the reply.
    ///
    /// Empty drafts and submissions while a reply is pending are rejected
    /// without touching any state.
    ///
    /// # Panics
    ///
    /// An accepted submission spawns the reply timer with `tokio::spawn`, so
    /// this panics when called outside a Tokio runtime.
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        if self.pending.is_some() {
            tracing::debug!("Submit rejected: reply pending");
            return SubmitOutcome::Rejected(RejectReason::ReplyPending);
        }
        let content = self.draft_input.trim();
        if content.is_empty() {
            tracing::debug!("Submit rejected: empty draft");
            return SubmitOutcome::Rejected(RejectReason::EmptyDraft);
        }

        let content = content.to_string();
        let message = self
            .transcript
            .push(MessageRole::User, content, Local::now());
        self.draft_input.clear();

        let ticket = self.replies.schedule();
        self.pending = Some(ticket);

        tracing::info!(message = %message, ticket = ticket.0, "User message accepted");
        SubmitOutcome::Accepted { message, ticket }
    }

    /// Timer continuation: append the simulated reply and clear pending.
    ///
    /// Returns the new message id, or `None` for a ticket that is not the
    /// outstanding one.
    pub fn complete_reply(&mut self, ticket: ReplyTicket) -> Option<MessageId> {
        if self.pending != Some(ticket) {
            tracing::warn!(ticket = ticket.0, "Ignoring stale reply ticket");
            return None;
        }
        let id = self
            .transcript
            .push(MessageRole::Assistant, SIMULATED_REPLY, Local::now());
        self.pending = None;
        tracing::debug!(message = %id, "Simulated reply appended");
        Some(id)
    }

    /// Interpret a key press for the compose field.
    ///
    /// # Panics
    ///
    /// A plain Enter goes through [`submit_draft`](Self::submit_draft) and
    /// panics outside a Tokio runtime for the same reason.
    pub fn handle_submit_key(&mut self, key: KeyEvent) -> KeyDisposition {
        if key.kind == KeyEventKind::Release || key.code != KeyCode::Enter {
            return KeyDisposition::PassThrough;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
        {
            KeyDisposition::InsertNewline
        } else {
            KeyDisposition::Submit(self.submit_draft())
        }
    }

    /// Abort the outstanding reply timer, if any. The widget stays readable.
    pub fn dispose(&mut self) {
        if self.pending.is_some() {
            tracing::debug!("Disposing chat widget with a reply in flight");
        }
        self.replies.cancel_all();
    }
}
