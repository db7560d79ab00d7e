//! One-column scrollbar for the transcript.
//!
//! Hidden while the whole transcript fits; otherwise a dim `│` track with a
//! `█` thumb whose size tracks the visible fraction of the content.

use std::ops::Range;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::tui::theme::Theme;

pub struct Scrollbar {
    offset: usize,
    content_height: usize,
    viewport_height: usize,
}

impl Scrollbar {
    pub fn new(offset: usize, content_height: usize, viewport_height: usize) -> Self {
        Self {
            offset,
            content_height,
            viewport_height,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Rows of a `track`-tall bar covered by the thumb.
    fn thumb(&self, track: u16) -> Range<u16> {
        let track_len = track as usize;
        let content = self.content_height.max(1);
        let len = (track_len * self.viewport_height)
            .div_ceil(content)
            .clamp(1, track_len.max(1));

        let max_offset = self.content_height.saturating_sub(self.viewport_height);
        let free = track_len.saturating_sub(len);
        let start = if max_offset == 0 {
            0
        } else {
            // Round to nearest so the thumb touches the bottom at max offset
            (self.offset.min(max_offset) * free + max_offset / 2) / max_offset
        };

        start as u16..(start + len) as u16
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() || !self.is_visible() {
            return;
        }

        let thumb = self.thumb(area.height);
        for row in 0..area.height {
            let (symbol, style) = if thumb.contains(&row) {
                ("█", Style::default().fg(Theme::ACCENT))
            } else {
                ("│", Style::default().fg(Theme::BORDER))
            };
            buf[(area.x, area.y + row)].set_symbol(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_content_fits() {
        assert!(!Scrollbar::new(0, 5, 10).is_visible());
        assert!(Scrollbar::new(0, 20, 10).is_visible());

        let area = Rect::new(0, 0, 1, 10);
        let mut buf = Buffer::empty(area);
        Scrollbar::new(0, 5, 10).render(area, &mut buf);
        assert!((0..10).all(|y| buf[(0, y)].symbol() == " "));
    }

    #[test]
    fn test_thumb_spans_top_and_bottom() {
        assert_eq!(Scrollbar::new(0, 20, 10).thumb(10), 0..5);
        assert_eq!(Scrollbar::new(10, 20, 10).thumb(10), 5..10);
        // Offsets past the end pin the thumb to the bottom
        assert_eq!(Scrollbar::new(99, 20, 10).thumb(10), 5..10);
    }

    #[test]
    fn test_thumb_never_vanishes() {
        assert_eq!(Scrollbar::new(500, 1000, 4).thumb(4).len(), 1);
    }

    #[test]
    fn test_renders_track_and_thumb() {
        let area = Rect::new(0, 0, 1, 4);
        let mut buf = Buffer::empty(area);
        Scrollbar::new(0, 8, 4).render(area, &mut buf);
        let column: Vec<&str> = (0..4).map(|y| buf[(0, y)].symbol()).collect();
        assert_eq!(column, ["█", "█", "│", "│"]);
    }
}
