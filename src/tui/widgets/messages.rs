//! Message list widget
//!
//! Renders the transcript as chat bubbles: assistant messages on the left,
//! user messages on the right with inverted colours. Each bubble carries the
//! role icon and an `HH:MM` time label. While a reply is pending a thinking
//! row follows the last message.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::chat::{ChatMessage, MessageRole};
use crate::tui::scroll_animation::ScrollAnimation;
use crate::tui::theme::Theme;
use crate::tui::widgets::{Scrollbar, ThinkingIndicator};

/// Columns taken by a role icon plus its gap
const ICON_COLS: u16 = 3;
/// Narrowest bubble we try to keep when the terminal allows it
const MIN_BUBBLE_WIDTH: u16 = 12;

/// State for the message list
#[derive(Debug, Default)]
pub struct MessageListState {
    /// Current scroll offset (in lines)
    pub offset: usize,
    /// Total content height (in lines)
    pub content_height: usize,
    /// Viewport height
    pub viewport_height: usize,
    /// Transcript revision the view last scrolled for
    seen_revision: Option<u64>,
    animation: ScrollAnimation,
}

impl MessageListState {
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.animation.stop();
        self.offset = self.offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.animation.stop();
        self.offset = (self.offset + amount).min(self.max_offset());
    }

    /// Glide to the newest message.
    pub fn scroll_to_latest(&mut self) {
        self.animation.start(self.offset);
    }

    /// Scroll to the latest message if the transcript changed since last call.
    pub fn follow_revision(&mut self, revision: u64) -> bool {
        if self.seen_revision == Some(revision) {
            return false;
        }
        self.seen_revision = Some(revision);
        self.scroll_to_latest();
        true
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    /// Advance the scroll animation. Returns true if the offset moved.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.animation.is_active() {
            return false;
        }
        let next = self.animation.tick(delta, self.max_offset());
        let moved = next != self.offset;
        self.offset = next;
        moved
    }
}

/// Wrapped content of one bubble
struct BubbleLayout {
    lines: Vec<String>,
    time: String,
    width: u16,
}

impl BubbleLayout {
    fn new(message: &ChatMessage, area_width: u16) -> Self {
        // One column reserved for the scrollbar
        let available = area_width.saturating_sub(ICON_COLS + 1).max(1);
        let max_width = (available * 4 / 5).max(MIN_BUBBLE_WIDTH.min(available));
        let text_width = max_width.saturating_sub(2).max(1) as usize;

        let lines: Vec<String> = textwrap::wrap(&message.content, text_width)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        let time = message.time_label();

        let widest = lines
            .iter()
            .map(|line| line.width())
            .chain(std::iter::once(time.width()))
            .max()
            .unwrap_or(0) as u16;

        Self {
            lines,
            time,
            width: (widest + 2).min(max_width),
        }
    }

    /// Content lines plus the time label
    fn height(&self) -> usize {
        self.lines.len() + 1
    }
}

/// Widget for rendering the message list
pub struct MessageList<'a> {
    messages: &'a [ChatMessage],
    is_pending: bool,
    spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            is_pending: false,
            spinner_frame: 0,
        }
    }

    pub fn pending(mut self, is_pending: bool) -> Self {
        self.is_pending = is_pending;
        self
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    fn render_bubble(
        &self,
        message: &ChatMessage,
        bubble: &BubbleLayout,
        area: Rect,
        buf: &mut Buffer,
        virtual_y: usize,
        offset: usize,
    ) {
        let role = message.role;
        let (icon_x, bubble_x) = match role {
            MessageRole::Assistant => (area.x, area.x + ICON_COLS),
            MessageRole::User => {
                let right = area.x + area.width.saturating_sub(1);
                let icon_x = right.saturating_sub(ICON_COLS - 1);
                (icon_x, icon_x.saturating_sub(bubble.width + 1))
            }
        };
        let style = Theme::bubble(role);

        let rows = bubble
            .lines
            .iter()
            .map(|text| (text.as_str(), style))
            .chain(std::iter::once((bubble.time.as_str(), Theme::time_label(role))));

        for (i, (text, text_style)) in rows.enumerate() {
            let Some(y) = visible_row(area, virtual_y + i, offset) else {
                continue;
            };
            buf.set_style(Rect::new(bubble_x, y, bubble.width, 1), style);
            buf.set_line(
                bubble_x + 1,
                y,
                &Line::from(Span::styled(text, text_style)),
                bubble.width.saturating_sub(2),
            );
            if i == 0 {
                buf.set_string(icon_x, y, role.icon(), Theme::muted());
            }
        }
    }
}

/// Screen row for a virtual line, if it falls inside the viewport.
fn visible_row(area: Rect, virtual_y: usize, offset: usize) -> Option<u16> {
    if virtual_y >= offset && virtual_y - offset < area.height as usize {
        Some(area.y + (virtual_y - offset) as u16)
    } else {
        None
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bubbles: Vec<BubbleLayout> = self
            .messages
            .iter()
            .map(|msg| BubbleLayout::new(msg, area.width))
            .collect();

        // Each bubble is followed by a one-line spacer
        let mut content_height: usize = bubbles.iter().map(|b| b.height() + 1).sum();
        if self.is_pending {
            content_height += 1;
        }
        state.content_height = content_height;
        state.viewport_height = area.height as usize;
        state.offset = state.offset.min(state.max_offset());

        let mut virtual_y = 0usize;
        for (msg, bubble) in self.messages.iter().zip(&bubbles) {
            let height = bubble.height();
            if virtual_y + height > state.offset
                && virtual_y < state.offset + area.height as usize
            {
                self.render_bubble(msg, bubble, area, buf, virtual_y, state.offset);
            }
            virtual_y += height + 1;
        }

        if self.is_pending {
            if let Some(y) = visible_row(area, virtual_y, state.offset) {
                ThinkingIndicator::new(self.spinner_frame)
                    .render(Rect::new(area.x, y, area.width, 1), buf);
            }
        }

        let scrollbar_area = Rect::new(area.x + area.width - 1, area.y, 1, area.height);
        Scrollbar::new(state.offset, state.content_height, state.viewport_height)
            .render(scrollbar_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{MessageId, SEEDED_GREETING};
    use chrono::{Local, TimeZone};

    fn message(id: u64, role: MessageRole, content: &str) -> ChatMessage {
        let ts = Local.with_ymd_and_hms(2024, 5, 1, 14, 7, 0).unwrap();
        ChatMessage::new(MessageId(id), role, content, ts)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_alignment_by_role() {
        let messages = vec![
            message(1, MessageRole::Assistant, "hi there"),
            message(2, MessageRole::User, "yo"),
        ];
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let mut state = MessageListState::default();
        MessageList::new(&messages).render(area, &mut buf, &mut state);

        let assistant_row = row_text(&buf, 0);
        let user_row = row_text(&buf, 3);
        let a = assistant_row.find("hi there").expect("assistant text");
        let u = user_row.find("yo").expect("user text");
        assert!(a < 10);
        assert!(u > 20);
        assert!(row_text(&buf, 1).contains("14:07"));
    }

    #[test]
    fn test_user_bubble_is_inverted() {
        let messages = vec![message(2, MessageRole::User, "inverted")];
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        let mut state = MessageListState::default();
        MessageList::new(&messages).render(area, &mut buf, &mut state);

        let x = row_text(&buf, 0).find("inverted").unwrap() as u16;
        assert_eq!(buf[(x, 0)].bg, Theme::bubble(MessageRole::User).bg.unwrap());
    }

    #[test]
    fn test_wraps_long_content_and_counts_height() {
        let messages = vec![message(1, MessageRole::Assistant, SEEDED_GREETING)];
        let area = Rect::new(0, 0, 40, 30);
        let mut buf = Buffer::empty(area);
        let mut state = MessageListState::default();
        MessageList::new(&messages).render(area, &mut buf, &mut state);

        assert!(state.content_height > 4);
        assert!(screen(&buf).contains("Lokachakra"));
    }

    #[test]
    fn test_thinking_row_only_while_pending() {
        let messages = vec![message(1, MessageRole::Assistant, "hello")];
        let area = Rect::new(0, 0, 40, 8);

        let mut buf = Buffer::empty(area);
        let mut state = MessageListState::default();
        MessageList::new(&messages)
            .pending(true)
            .render(area, &mut buf, &mut state);
        assert!(screen(&buf).contains("Thinking..."));
        let pending_height = state.content_height;

        let mut buf = Buffer::empty(area);
        MessageList::new(&messages).render(area, &mut buf, &mut state);
        assert!(!screen(&buf).contains("Thinking..."));
        assert_eq!(state.content_height + 1, pending_height);
    }

    #[test]
    fn test_follow_revision_glides_to_bottom() {
        let messages: Vec<ChatMessage> = (0..20)
            .map(|i| message(i + 1, MessageRole::Assistant, &format!("message {}", i)))
            .collect();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let mut state = MessageListState::default();
        MessageList::new(&messages).render(area, &mut buf, &mut state);
        assert_eq!(state.offset, 0);

        assert!(state.follow_revision(7));
        assert!(!state.follow_revision(7));
        assert!(state.is_animating());

        for _ in 0..500 {
            state.tick(Duration::from_millis(16));
            if !state.is_animating() {
                break;
            }
        }
        assert_eq!(state.offset, state.max_offset());
        assert!(state.max_offset() > 0);
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let mut state = MessageListState {
            content_height: 100,
            viewport_height: 10,
            ..Default::default()
        };
        state.follow_revision(1);
        state.tick(Duration::from_millis(16));
        state.scroll_up(1);
        assert!(!state.is_animating());
        state.scroll_down(500);
        assert_eq!(state.offset, 90);
    }
}
