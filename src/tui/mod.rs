//! Terminal front end for the Lokachakra chat
//!
//! Hosts a `ChatView` in a full-screen terminal with mouse support. Both
//! layout templates render the same view.

mod app;
mod event;
mod scroll_animation;
mod templates;
mod theme;
mod ui;

pub mod view;
pub mod widgets;

pub use app::TuiApp;
pub use templates::TemplateCopy;
pub use view::{ChatView, ViewAction};

use anyhow::Result;

use crate::config::Settings;

/// Run the TUI application
pub async fn run(settings: Settings) -> Result<()> {
    let mut app = TuiApp::new(&settings)?;
    app.run().await
}
