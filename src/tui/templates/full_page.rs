//! Full-screen chat page: header, model status, transcript, compose area.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use super::{compose_height, render_compose};
use crate::tui::hit_test::ClickTarget;
use crate::tui::theme::Theme;
use crate::tui::view::ChatView;
use crate::tui::widgets::{Header, MessageList, StatusBar};

pub fn render(frame: &mut Frame, view: &mut ChatView, area: Rect) {
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(compose_height(view)),
        ])
        .split(area);

    let copy = view.copy();
    frame.render_widget(Header::new(copy.title, copy.subtitle), chunks[0]);
    view.hit_registry
        .register(Header::settings_area(chunks[0]), ClickTarget::HelpButton);

    let mut status = StatusBar::new(view.widget.contributor_count());
    if let Some(label) = copy.model_label {
        status = status.model_label(label);
    }
    if let Some(tagline) = copy.tagline {
        status = status.tagline(tagline);
    }
    frame.render_widget(status, chunks[1]);

    let list = MessageList::new(view.widget.messages())
        .pending(view.widget.is_pending())
        .spinner_frame(view.spinner_frame());
    frame.render_stateful_widget(list, chunks[2], &mut view.message_list_state);

    render_compose(frame, view, chunks[3]);
}
