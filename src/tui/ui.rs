//! Main UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::templates;
use super::theme::Theme;
use super::view::ChatView;

/// Render the entire UI
pub fn render(frame: &mut Frame, view: &mut ChatView) {
    view.hit_registry.clear();

    templates::render(frame, view);

    if view.show_help {
        render_help(frame, frame.area());
    }
}

fn shortcut(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Theme::BLUE)),
        Span::raw(action),
    ])
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help_lines = vec![
        Line::from(vec![Span::styled(
            " Keyboard Shortcuts ",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        shortcut(" Enter       ", "Send message"),
        shortcut(" Shift+Enter ", "New line (Alt+Enter on basic terminals)"),
        shortcut(" Ctrl+V      ", "Paste"),
        shortcut(" PgUp/PgDn   ", "Scroll messages"),
        shortcut(" Mouse wheel ", "Scroll messages"),
        shortcut(" F1 / ⚙      ", "Toggle this help"),
        shortcut(" Esc         ", "Close help"),
        shortcut(" Ctrl+Q      ", "Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::ACCENT))
        .title(" Help ");

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .alignment(Alignment::Left);

    let area = centered_rect(60, 50, area);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::tui::hit_test::ClickTarget;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(rect, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn test_help_overlay_toggles_from_header() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut view = ChatView::new(&Settings::default(), tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        terminal.draw(|frame| render(frame, &mut view)).unwrap();
        assert!(!screen(&terminal).contains("Keyboard Shortcuts"));

        let settings = view
            .hit_registry
            .hit_test(97, 0)
            .expect("settings glyph registered");
        assert_eq!(settings, ClickTarget::HelpButton);
        view.handle_click(0, 97);
        assert!(view.show_help);

        terminal.draw(|frame| render(frame, &mut view)).unwrap();
        assert!(screen(&terminal).contains("Keyboard Shortcuts"));
    }
}
