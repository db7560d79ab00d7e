//! Append-only conversation transcript

use chrono::{DateTime, Local};

use super::message::{ChatMessage, MessageId, MessageRole};

/// Assistant greeting present at session start.
pub const SEEDED_GREETING: &str = "Hello! I'm your Lokachakra decentralized SLM, trained \
collaboratively by our global community. I'm powered by checkpoints stored on IPFS and \
verified through blockchain. How can I assist you today?";

/// Ordered list of all messages in a session.
///
/// Messages are only ever appended. Every append bumps `revision`, which the
/// view uses to decide when to scroll to the newest message.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    last_id: u64,
    revision: u64,
}

impl Transcript {
    /// Create a transcript holding only the seeded greeting.
    pub fn seeded() -> Self {
        Self::seeded_at(Local::now())
    }

    pub fn seeded_at(now: DateTime<Local>) -> Self {
        let greeting = ChatMessage::new(MessageId(1), MessageRole::Assistant, SEEDED_GREETING, now);
        Self {
            messages: vec![greeting],
            last_id: 1,
            revision: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of appends since the transcript was seeded
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a new message created at `now` and return its id.
    pub fn push(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        now: DateTime<Local>,
    ) -> MessageId {
        let id = self.next_id(&now);
        self.messages.push(ChatMessage::new(id, role, content, now));
        self.revision += 1;
        id
    }

    /// Millisecond timestamp, or one past the previous id when two messages
    /// land in the same millisecond (or the clock goes backwards).
    fn next_id(&mut self, now: &DateTime<Local>) -> MessageId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        MessageId(id)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_transcript_has_greeting() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), 1);
        let first = &transcript.messages()[0];
        assert_eq!(first.role, MessageRole::Assistant);
        assert_eq!(first.content, SEEDED_GREETING);
        assert_eq!(first.id, MessageId(1));
        assert_eq!(transcript.revision(), 0);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut transcript = Transcript::seeded();
        let now = Local::now();
        let ids: HashSet<_> = (0..50)
            .map(|i| transcript.push(MessageRole::User, format!("m{}", i), now))
            .collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(transcript.len(), 51);
    }

    #[test]
    fn test_ids_follow_clock() {
        let mut transcript = Transcript::seeded();
        let now = Local::now();
        let id = transcript.push(MessageRole::User, "hi", now);
        assert_eq!(id.0, now.timestamp_millis() as u64);
    }

    #[test]
    fn test_clock_going_backwards_still_unique() {
        let mut transcript = Transcript::seeded();
        let now = Local::now();
        let earlier = now - chrono::Duration::seconds(30);
        let a = transcript.push(MessageRole::User, "a", now);
        let b = transcript.push(MessageRole::Assistant, "b", earlier);
        assert!(b > a);
    }

    #[test]
    fn test_push_bumps_revision_and_preserves_order() {
        let mut transcript = Transcript::seeded();
        transcript.push(MessageRole::User, "first", Local::now());
        transcript.push(MessageRole::Assistant, "second", Local::now());
        assert_eq!(transcript.revision(), 2);
        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec![SEEDED_GREETING, "first", "second"]);
        assert_eq!(transcript.last().map(|m| m.content.as_str()), Some("second"));
    }
}
