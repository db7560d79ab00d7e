//! Model status bar widget
//!
//! Format: ` 🛡 Decentralized AI Model │ 🗄 Contributors: 42 ...... Powered by Community Training`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Status bar with the model label and contributor count
pub struct StatusBar<'a> {
    model_label: Option<&'a str>,
    contributor_count: u32,
    tagline: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(contributor_count: u32) -> Self {
        Self {
            model_label: None,
            contributor_count,
            tagline: None,
        }
    }

    pub fn model_label(mut self, label: &'a str) -> Self {
        self.model_label = Some(label);
        self
    }

    /// Right-aligned text
    pub fn tagline(mut self, tagline: &'a str) -> Self {
        self.tagline = Some(tagline);
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let hint_style = Theme::muted();
        let separator_style = Style::default().fg(Theme::BORDER);

        let mut spans = vec![Span::raw(" ")];
        if let Some(label) = self.model_label {
            spans.push(Span::styled("🛡 ", Style::default().fg(Theme::GREEN)));
            spans.push(Span::styled(label, hint_style));
            spans.push(Span::styled(" │ ", separator_style));
        }
        spans.push(Span::styled("🗄 ", Style::default().fg(Theme::BLUE)));
        spans.push(Span::styled("Contributors: ", hint_style));
        spans.push(Span::styled(
            self.contributor_count.to_string(),
            Style::default()
                .fg(Theme::BLUE)
                .add_modifier(Modifier::BOLD),
        ));

        let left = Line::from(spans);
        buf.set_line(area.x, area.y, &left, area.width);

        if let Some(tagline) = self.tagline {
            let right = Line::from(Span::styled(format!("{} ", tagline), hint_style));
            let left_width = left.width() as u16;
            let right_width = right.width() as u16;
            if left_width + right_width < area.width {
                buf.set_line(
                    area.x + area.width - right_width,
                    area.y,
                    &right,
                    right_width,
                );
            }
        }
    }
}
