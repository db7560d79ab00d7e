//! Thinking indicator shown while a reply is pending

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::chat::MessageRole;
use crate::tui::theme::Theme;

/// Spinner animation frames.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Ticks each spinner frame stays on screen (~80ms at 60 FPS)
pub const TICKS_PER_FRAME: usize = 5;

pub struct ThinkingIndicator {
    frame: usize,
}

impl ThinkingIndicator {
    /// `frame` is a free-running counter; it wraps over the spinner frames.
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }

    fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }
}

impl Widget for ThinkingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let bubble = Theme::bubble(MessageRole::Assistant);
        let spans = vec![
            Span::styled(format!("{}  ", MessageRole::Assistant.icon()), Theme::muted()),
            Span::styled(
                format!(" {} ", self.spinner()),
                bubble.fg(Theme::THINKING).add_modifier(Modifier::BOLD),
            ),
            Span::styled("Thinking... ", bubble.patch(Style::default().fg(Theme::THINKING))),
        ];
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
