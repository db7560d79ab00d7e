//! Compact card: a bordered box centred on screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::{compose_height, render_compose};
use crate::tui::hit_test::ClickTarget;
use crate::tui::theme::Theme;
use crate::tui::view::ChatView;
use crate::tui::widgets::{Header, MessageList};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 28;

/// Centre a `width` x `height` box in `area`, shrinking to fit.
fn card_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render(frame: &mut Frame, view: &mut ChatView, area: Rect) {
    let card = card_rect(area, CARD_WIDTH, CARD_HEIGHT);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::BORDER));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(compose_height(view)),
        ])
        .split(inner);

    let copy = view.copy();
    frame.render_widget(Header::new(copy.title, copy.subtitle), chunks[0]);
    view.hit_registry
        .register(Header::settings_area(chunks[0]), ClickTarget::HelpButton);

    // Card shows only the contributor count under the header
    let contributors = Line::from(vec![
        Span::styled(" 🗄 ", Style::default().fg(Theme::BLUE)),
        Span::styled(
            format!("Contributors: {}", view.widget.contributor_count()),
            Theme::muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(contributors), chunks[1]);

    let list = MessageList::new(view.widget.messages())
        .pending(view.widget.is_pending())
        .spinner_frame(view.spinner_frame());
    frame.render_stateful_widget(list, chunks[2], &mut view.message_list_state);

    render_compose(frame, view, chunks[3]);
}
