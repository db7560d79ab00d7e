//! TUI color palette
//!
//! Monochrome chat bubbles with green/blue accents for the status line.

use ratatui::style::{Color, Modifier, Style};

use crate::chat::MessageRole;

/// TUI color theme
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Black;
    pub const HEADER_FG: Color = Color::White;
    pub const TEXT: Color = Color::Rgb(230, 230, 230);
    pub const MUTED: Color = Color::Rgb(128, 128, 128);
    pub const BORDER: Color = Color::Rgb(90, 90, 90);
    pub const ACCENT: Color = Color::White;
    pub const GREEN: Color = Color::Rgb(22, 163, 74);
    pub const BLUE: Color = Color::Rgb(37, 99, 235);
    pub const THINKING: Color = Color::Rgb(156, 163, 175);
    pub const DISABLED: Color = Color::Rgb(156, 163, 175);
    pub const INPUT_BG: Color = Color::Reset;

    /// Bubble style: inverted for the user, plain for the assistant.
    pub fn bubble(role: MessageRole) -> Style {
        match role {
            MessageRole::User => Style::default().fg(Color::Black).bg(Color::White),
            MessageRole::Assistant => Style::default().fg(Self::TEXT).bg(Color::Rgb(38, 38, 38)),
        }
    }

    /// Time label style inside a bubble
    pub fn time_label(role: MessageRole) -> Style {
        match role {
            MessageRole::User => Self::bubble(role).fg(Color::Rgb(80, 80, 80)),
            MessageRole::Assistant => Self::bubble(role).fg(Self::MUTED),
        }
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::HEADER_FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }
}
