//! Presentation templates
//!
//! Two interchangeable layouts over the same `ChatView`: a full-screen page
//! and a compact card. They differ only in arrangement and copy; all
//! behaviour lives in the view and the chat widget.

mod card;
mod full_page;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use super::hit_test::ClickTarget;
use super::theme::Theme;
use super::view::ChatView;
use super::widgets::{ComposeFooter, SendButton, SEND_BUTTON_WIDTH};
use crate::config::LayoutVariant;

/// Static text that differs between templates
#[derive(Debug)]
pub struct TemplateCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Shown in the status bar when present
    pub model_label: Option<&'static str>,
    pub tagline: Option<&'static str>,
    pub placeholder: &'static str,
    pub hint: &'static str,
}

const FULL_PAGE_COPY: TemplateCopy = TemplateCopy {
    title: "Lokachakra SLM",
    subtitle: "Community-Trained • Blockchain-Verified",
    model_label: Some("Decentralized AI Model"),
    tagline: Some("Powered by Community Training"),
    placeholder: "Type your message here...",
    hint: "Press Enter to send, Shift+Enter for new line",
};

const CARD_COPY: TemplateCopy = TemplateCopy {
    title: "Lokachakra SLM",
    subtitle: "Decentralized AI Assistant",
    model_label: None,
    tagline: None,
    placeholder: "Ask the community model...",
    hint: "Enter to send • Shift+Enter new line",
};

impl TemplateCopy {
    pub fn for_layout(layout: LayoutVariant) -> &'static TemplateCopy {
        match layout {
            LayoutVariant::FullPage => &FULL_PAGE_COPY,
            LayoutVariant::Card => &CARD_COPY,
        }
    }
}

/// Draw the view with its configured template.
pub fn render(frame: &mut Frame, view: &mut ChatView) {
    match view.layout {
        LayoutVariant::FullPage => full_page::render(frame, view, frame.area()),
        LayoutVariant::Card => card::render(frame, view, frame.area()),
    }
}

/// Rows needed by the compose area: separator, 1-3 input lines, footer.
fn compose_height(view: &ChatView) -> u16 {
    1 + view.input_lines().clamp(1, 3) as u16 + 1
}

/// Text area with the send button to its right, then the hint/counter footer.
fn render_compose(frame: &mut Frame, view: &mut ChatView, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(SEND_BUTTON_WIDTH)])
        .split(rows[0]);

    // Short terminals can squeeze the input row away entirely
    if !rows[0].is_empty() {
        frame.render_widget(&view.input, cols[0]);
        view.hit_registry.register(cols[0], ClickTarget::Input);

        // Button sits on the last input row
        let button_row = cols[1].y + cols[1].height.saturating_sub(1);
        let button_area =
            Rect::new(cols[1].x, button_row, cols[1].width, 1).intersection(frame.area());
        if !button_area.is_empty() {
            frame.render_widget(SendButton::new(view.widget.can_submit()), button_area);
            view.hit_registry.register(button_area, ClickTarget::SendButton);
        }
    }

    let footer = ComposeFooter::new(
        view.copy().hint,
        view.widget.draft_chars(),
        view.widget.input_limit().max_chars,
    );
    frame.render_widget(footer, rows[1]);
}
