//! Configuration management.

mod settings;
mod xdg;

pub use settings::{LayoutVariant, Settings, SettingsError, MAX_REPLY_DELAY_MS};
pub use xdg::XdgDirs;
