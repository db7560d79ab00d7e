//! Chat view: the widget plus everything the terminal needs to present it.
//!
//! `ChatView` owns the compose text area, scroll state and hit-test regions,
//! and translates terminal events into `ChatWidget` operations. It never
//! touches the terminal itself, so it can be driven and rendered in tests.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::style::{Modifier, Style};
use tokio::sync::mpsc;
use tui_textarea::{CursorMove, Input, TextArea};

use super::hit_test::{ClickTarget, HitTestRegistry};
use super::templates::TemplateCopy;
use super::theme::Theme;
use super::widgets::{thinking::TICKS_PER_FRAME, MessageListState};
use crate::chat::{ChatWidget, KeyDisposition, ReplyTicket, SubmitOutcome};
use crate::config::{LayoutVariant, Settings};

/// Lines moved per mouse wheel notch
const WHEEL_SCROLL_LINES: usize = 3;

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Continue,
    Quit,
}

pub struct ChatView {
    pub widget: ChatWidget,
    pub layout: LayoutVariant,
    /// Text input area
    pub input: TextArea<'static>,
    pub message_list_state: MessageListState,
    /// Hit test registry for mouse interaction
    pub hit_registry: HitTestRegistry,
    pub show_help: bool,
    /// Free-running tick counter driving the spinner
    pub tick_count: usize,
    last_tick: Instant,
}

impl ChatView {
    pub fn new(settings: &Settings, reply_tx: mpsc::UnboundedSender<ReplyTicket>) -> Self {
        let layout = settings.layout;
        let widget = ChatWidget::new(settings.input_limit(), settings.reply_delay(), reply_tx);
        Self {
            widget,
            layout,
            input: build_input(TemplateCopy::for_layout(layout).placeholder, ""),
            message_list_state: MessageListState::default(),
            hit_registry: HitTestRegistry::new(),
            show_help: false,
            tick_count: 0,
            last_tick: Instant::now(),
        }
    }

    pub fn copy(&self) -> &'static TemplateCopy {
        TemplateCopy::for_layout(self.layout)
    }

    /// Current spinner frame index
    pub fn spinner_frame(&self) -> usize {
        self.tick_count / TICKS_PER_FRAME
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        if key.kind == KeyEventKind::Release {
            return ViewAction::Continue;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return ViewAction::Quit,
            // F1 toggles help (don't use '?' - that should just type a question mark)
            (_, KeyCode::F(1)) => {
                self.show_help = !self.show_help;
                return ViewAction::Continue;
            }
            (_, KeyCode::Esc) => {
                self.show_help = false;
                return ViewAction::Continue;
            }
            // Absorb everything else while the overlay is open
            _ if self.show_help => return ViewAction::Continue,
            (_, KeyCode::PageUp) => {
                let page = self.message_list_state.viewport_height.max(1);
                self.message_list_state.scroll_up(page);
                return ViewAction::Continue;
            }
            (_, KeyCode::PageDown) => {
                let page = self.message_list_state.viewport_height.max(1);
                self.message_list_state.scroll_down(page);
                return ViewAction::Continue;
            }
            _ => {}
        }

        match self.widget.handle_submit_key(key) {
            KeyDisposition::Submit(outcome) => self.after_submit(outcome),
            KeyDisposition::InsertNewline => {
                self.input.insert_newline();
                self.sync_draft();
            }
            KeyDisposition::PassThrough => {
                if self.input.input(Input::from(key)) {
                    self.sync_draft();
                }
            }
        }
        ViewAction::Continue
    }

    /// Mouse wheel scrolls the transcript
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.message_list_state.scroll_up(WHEEL_SCROLL_LINES),
            MouseEventKind::ScrollDown => {
                self.message_list_state.scroll_down(WHEEL_SCROLL_LINES)
            }
            _ => {}
        }
    }

    /// Resolve a left click against the regions registered on the last render.
    ///
    /// While help is open only the settings glyph responds.
    pub fn handle_click(&mut self, row: u16, col: u16) {
        match self.hit_registry.hit_test(col, row) {
            Some(ClickTarget::HelpButton) => self.show_help = !self.show_help,
            _ if self.show_help => {}
            Some(ClickTarget::SendButton) => self.submit(),
            Some(ClickTarget::Input) | None => {}
        }
    }

    /// Insert pasted text at the cursor
    pub fn paste(&mut self, text: &str) {
        if self.show_help {
            return;
        }
        if self.input.insert_str(text) {
            self.sync_draft();
        }
    }

    /// Pointer activation of the send control
    pub fn submit(&mut self) {
        let outcome = self.widget.submit_draft();
        self.after_submit(outcome);
    }

    pub fn complete_reply(&mut self, ticket: ReplyTicket) {
        self.widget.complete_reply(ticket);
    }

    /// Advance animations by the wall time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(delta);
    }

    pub fn advance(&mut self, delta: Duration) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.message_list_state.tick(delta);
    }

    /// Called before each draw: react to transcript changes.
    pub fn prepare_for_render(&mut self) {
        let revision = self.widget.transcript().revision();
        if self.message_list_state.follow_revision(revision) {
            tracing::trace!(revision, "Transcript changed, scrolling to latest");
        }
    }

    /// Number of lines the compose field currently needs
    pub fn input_lines(&self) -> usize {
        self.input.lines().len()
    }

    fn after_submit(&mut self, outcome: SubmitOutcome) {
        if outcome.is_accepted() {
            self.input = build_input(self.copy().placeholder, "");
        }
    }

    /// Push the text area contents into the widget's draft.
    fn sync_draft(&mut self) {
        let text = self.input.lines().join("\n");
        self.widget.update_draft(text.as_str());
        if self.widget.draft() != text {
            // Enforced limit cut the draft; mirror that in the text area
            self.input = build_input(self.copy().placeholder, self.widget.draft());
        }
    }
}

impl Drop for ChatView {
    fn drop(&mut self) {
        self.widget.dispose();
    }
}

fn build_input(placeholder: &str, text: &str) -> TextArea<'static> {
    let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut input = TextArea::new(lines);
    input.set_cursor_line_style(Style::default());
    input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    input.set_placeholder_text(placeholder.to_string());
    input.set_placeholder_style(Style::default().fg(Theme::MUTED));
    input.set_style(Style::default().fg(Theme::TEXT).bg(Theme::INPUT_BG));
    input.move_cursor(CursorMove::Bottom);
    input.move_cursor(CursorMove::End);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{InputLimitPolicy, MessageRole, SIMULATED_REPLY};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn new_view(settings: Settings) -> (ChatView, UnboundedReceiver<ReplyTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChatView::new(&settings, tx), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(view: &mut ChatView, text: &str) {
        for c in text.chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_updates_draft() {
        let (mut view, _rx) = new_view(Settings::default());
        type_str(&mut view, "abc");
        assert_eq!(view.widget.draft(), "abc");
        view.handle_key(key(KeyCode::Backspace));
        assert_eq!(view.widget.draft(), "ab");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut view, _rx) = new_view(Settings::default());
        type_str(&mut view, "a");
        view.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_str(&mut view, "b");
        assert_eq!(view.widget.draft(), "a\nb");
        assert_eq!(view.input_lines(), 2);
        assert_eq!(view.widget.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_submits_and_clears_input() {
        let (mut view, mut rx) = new_view(Settings::default());
        type_str(&mut view, "Hello");
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.widget.messages().len(), 2);
        assert!(view.widget.is_pending());
        assert!(view.input.is_empty());
        assert_eq!(view.widget.draft(), "");

        let ticket = rx.recv().await.expect("reply");
        view.complete_reply(ticket);
        let last = view.widget.transcript().last().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.content, SIMULATED_REPLY);
        assert!(!view.widget.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_while_pending_keeps_text() {
        let (mut view, _rx) = new_view(Settings::default());
        type_str(&mut view, "one");
        view.handle_key(key(KeyCode::Enter));
        type_str(&mut view, "two");
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.widget.messages().len(), 2);
        assert_eq!(view.widget.draft(), "two");
        assert_eq!(view.input.lines(), ["two"]);
    }

    #[test]
    fn test_enforced_limit_trims_text_area() {
        let settings = Settings {
            input_limit: Some(4),
            input_limit_policy: InputLimitPolicy::Enforced,
            ..Settings::default()
        };
        let (mut view, _rx) = new_view(settings);
        view.paste("abcdefgh");
        assert_eq!(view.widget.draft(), "abcd");
        assert_eq!(view.input.lines(), ["abcd"]);
    }

    #[test]
    fn test_help_overlay_absorbs_typing() {
        let (mut view, _rx) = new_view(Settings::default());
        view.handle_key(key(KeyCode::F(1)));
        assert!(view.show_help);
        type_str(&mut view, "xyz");
        assert_eq!(view.widget.draft(), "");
        view.handle_key(key(KeyCode::Esc));
        assert!(!view.show_help);
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_overlay_absorbs_send_click() {
        let (mut view, _rx) = new_view(Settings::default());
        view.hit_registry
            .register(ratatui::layout::Rect::new(70, 20, 5, 1), ClickTarget::SendButton);
        view.hit_registry
            .register(ratatui::layout::Rect::new(77, 0, 2, 1), ClickTarget::HelpButton);
        view.paste("hello");

        view.handle_click(0, 77);
        assert!(view.show_help);
        view.handle_click(20, 71);
        assert_eq!(view.widget.messages().len(), 1);
        assert_eq!(view.widget.draft(), "hello");

        // The glyph still closes help, after which the button works again
        view.handle_click(0, 77);
        assert!(!view.show_help);
        view.handle_click(20, 71);
        assert_eq!(view.widget.messages().len(), 2);
    }

    #[test]
    fn test_reply_delay_from_settings() {
        let settings = Settings {
            reply_delay_ms: 250,
            ..Settings::default()
        };
        let (view, _rx) = new_view(settings);
        assert_eq!(view.widget.reply_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_quit_shortcuts() {
        let (mut view, _rx) = new_view(Settings::default());
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(view.handle_key(ctrl_q), ViewAction::Quit);
        assert_eq!(view.handle_key(ctrl_c), ViewAction::Quit);
        assert_eq!(view.handle_key(key(KeyCode::Char('q'))), ViewAction::Continue);
    }

    #[test]
    fn test_prepare_for_render_follows_transcript() {
        let (mut view, _rx) = new_view(Settings::default());
        view.prepare_for_render();
        assert!(view.message_list_state.is_animating());
        view.advance(Duration::from_millis(16));
        // Content fits, so the animation lands immediately
        assert!(!view.message_list_state.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_reply() {
        let (mut view, mut rx) = new_view(Settings::default());
        type_str(&mut view, "bye");
        view.handle_key(key(KeyCode::Enter));
        drop(view);

        assert_eq!(rx.recv().await, None);
    }
}
