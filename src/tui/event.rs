//! Event handling for keyboard, mouse, and terminal events

use std::time::Duration;

use arboard::Clipboard;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Mouse scroll and other raw mouse events
    Mouse(MouseEvent),
    /// Left button released over a cell
    Click { row: u16, col: u16 },
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for animations
    Tick,
    /// Bracketed paste
    Paste(String),
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, so it gets its own thread
        std::thread::spawn(move || loop {
            let app_event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                    Ok(Event::Mouse(mouse)) => Some(match mouse.kind {
                        MouseEventKind::Up(MouseButton::Left) => AppEvent::Click {
                            row: mouse.row,
                            col: mouse.column,
                        },
                        _ => AppEvent::Mouse(mouse),
                    }),
                    Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    Ok(Event::Paste(text)) => Some(AppEvent::Paste(text)),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        None
                    }
                }
            } else {
                Some(AppEvent::Tick)
            };

            if let Some(app_event) = app_event {
                if tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Clipboard access for Ctrl+V paste
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::debug!("Clipboard unavailable: {}", e);
                None
            }
        };
        Self { clipboard }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
