//! Compose area decorations: the send button and the hint/counter footer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Columns occupied by the send button
pub const SEND_BUTTON_WIDTH: u16 = 5;

/// Send control; greyed out when submission is not possible
pub struct SendButton {
    enabled: bool,
}

impl SendButton {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Widget for SendButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let style = if self.enabled {
            Style::default()
                .fg(Theme::HEADER_FG)
                .bg(Theme::HEADER_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::DISABLED).add_modifier(Modifier::DIM)
        };
        buf.set_string(area.x, area.y, " ➤  ", style);
    }
}

/// Footer line under the compose field: key hint left, `n/limit` right
pub struct ComposeFooter<'a> {
    hint: &'a str,
    chars: usize,
    limit: usize,
}

impl<'a> ComposeFooter<'a> {
    pub fn new(hint: &'a str, chars: usize, limit: usize) -> Self {
        Self { hint, chars, limit }
    }

    pub fn counter(&self) -> String {
        format!("{}/{}", self.chars, self.limit)
    }
}

impl Widget for ComposeFooter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let counter_style = if self.chars > self.limit {
            Style::default().fg(Theme::DISABLED).add_modifier(Modifier::BOLD)
        } else {
            Theme::muted()
        };

        buf.set_line(
            area.x,
            area.y,
            &Line::from(Span::styled(self.hint, Theme::muted())),
            area.width,
        );

        let counter = self.counter();
        let width = counter.len() as u16;
        if width <= area.width {
            buf.set_string(area.x + area.width - width, area.y, counter, counter_style);
        }
    }
}
