//! Terminal host for the chat view

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::event::{AppEvent, ClipboardManager, EventHandler};
use super::ui;
use super::view::{ChatView, ViewAction};
use crate::chat::ReplyTicket;
use crate::config::Settings;

/// Main TUI application
pub struct TuiApp {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Event handler (optional so we can take it out in run loop)
    events: Option<EventHandler>,
    /// Completed reply delays from the chat widget
    replies: mpsc::UnboundedReceiver<ReplyTicket>,
    /// Clipboard manager
    clipboard: ClipboardManager,
    /// Whether the app should quit
    should_quit: bool,
    pub view: ChatView,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(settings: &Settings) -> Result<Self> {
        // Initialize terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        // Shift+Enter is only distinguishable with the kitty keyboard protocol;
        // without it Alt+Enter still inserts a newline
        if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
            let _ = execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            );
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (reply_tx, replies) = mpsc::unbounded_channel();
        let view = ChatView::new(settings, reply_tx);

        tracing::info!(
            layout = ?settings.layout,
            reply_delay_ms = view.widget.reply_delay().as_millis() as u64,
            input_limit = view.widget.input_limit().max_chars,
            "Chat view ready"
        );

        Ok(Self {
            terminal,
            // ~60 FPS tick rate
            events: Some(EventHandler::new(Duration::from_millis(16))),
            replies,
            clipboard: ClipboardManager::new(),
            should_quit: false,
            view,
        })
    }

    /// Run the main loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        // Take events out of self to avoid borrow conflicts in select! loop
        let Some(mut events) = self.events.take() else {
            anyhow::bail!("event handler already consumed");
        };

        while !self.should_quit {
            // Prepare state for rendering (avoids mutation during render)
            self.view.prepare_for_render();

            let view = &mut self.view;
            self.terminal.draw(|frame| ui::render(frame, view))?;

            tokio::select! {
                biased;  // Replies first so the indicator never outlives its reply

                Some(ticket) = self.replies.recv() => {
                    tracing::debug!(ticket = ticket.0, "Reply delay elapsed");
                    self.view.complete_reply(ticket);
                }
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(event) => self.handle_event(event),
                        None => self.should_quit = true,
                    }
                }
            }
        }

        self.events = Some(events);
        Ok(())
    }

    /// Handle an application event
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if key.kind != KeyEventKind::Release
                    && key.modifiers == KeyModifiers::CONTROL
                    && key.code == KeyCode::Char('v')
                {
                    if let Some(text) = self.clipboard.paste() {
                        self.view.paste(&text);
                    }
                    return;
                }
                if self.view.handle_key(key) == ViewAction::Quit {
                    tracing::info!("Quit requested");
                    self.should_quit = true;
                }
            }
            AppEvent::Mouse(mouse) => self.view.handle_mouse(mouse),
            AppEvent::Click { row, col } => self.view.handle_click(row, col),
            AppEvent::Paste(text) => self.view.paste(&text),
            AppEvent::Tick => self.view.tick(),
            // Next draw picks up the new size
            AppEvent::Resize(..) => {}
        }
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore terminal - order matters!
        // Pop keyboard enhancement flags first (reverse order of setup)
        let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
