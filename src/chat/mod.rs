//! Chat state and logic, independent of how it is drawn.

pub mod message;
pub mod reply;
pub mod transcript;
pub mod widget;

pub use message::{format_time, ChatMessage, MessageId, MessageRole};
pub use reply::{ReplyScheduler, ReplyTicket, DEFAULT_REPLY_DELAY, SIMULATED_REPLY};
pub use transcript::{Transcript, SEEDED_GREETING};
pub use widget::{
    ChatWidget, InputLimit, InputLimitPolicy, KeyDisposition, RejectReason, SubmitOutcome,
    CONTRIBUTOR_COUNT,
};
