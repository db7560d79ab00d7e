//! Header bar widget
//!
//! Design: `🤖 Lokachakra SLM  subtitle ............ ⚙`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::chat::MessageRole;
use crate::tui::theme::Theme;

/// Glyph for the settings control at the right edge
pub const SETTINGS_GLYPH: &str = "⚙";

/// Header bar widget with branding and a settings glyph
pub struct Header<'a> {
    title: &'a str,
    subtitle: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, subtitle: &'a str) -> Self {
        Self { title, subtitle }
    }

    /// Where the settings glyph lands for a given header area
    pub fn settings_area(area: Rect) -> Rect {
        Rect::new(
            area.x + area.width.saturating_sub(3),
            area.y,
            2.min(area.width),
            1.min(area.height),
        )
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let bar = Style::default().bg(Theme::HEADER_BG).fg(Theme::HEADER_FG);
        buf.set_style(area, bar);

        let spans = vec![
            Span::styled(format!(" {} ", MessageRole::Assistant.icon()), bar),
            Span::styled(self.title, Theme::title().bg(Theme::HEADER_BG)),
            Span::styled("  ", bar),
            Span::styled(self.subtitle, bar.fg(Theme::MUTED)),
        ];
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);

        // Only draw the glyph if it does not overlap the title
        let settings = Self::settings_area(area);
        if line.width() + SETTINGS_GLYPH.width() + 2 <= area.width as usize {
            buf.set_string(settings.x, settings.y, SETTINGS_GLYPH, bar);
        }
    }
}
