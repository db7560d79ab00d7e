//! Application runner
//!
//! Sets up logging and the Tokio runtime, then hands over to the TUI.

use std::fs::File;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Settings, XdgDirs};

/// Runtime options that are not part of the persisted settings.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
}

impl AppConfig {
    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,lokachakra=debug"
        }
    }
}

/// Run the chat in the terminal.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or the terminal fails
/// to initialise.
pub fn run_tui(config: AppConfig, settings: Settings) -> anyhow::Result<()> {
    // The terminal is in raw mode, so logs go to a file
    let dirs = XdgDirs::new();
    dirs.ensure_dirs()
        .with_context(|| format!("Failed to create {}", dirs.state.display()))?;
    let log_path = dirs.log_file();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Lokachakra");

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let result = runtime.block_on(crate::tui::run(settings));

    if let Err(e) = &result {
        tracing::error!("TUI exited with error: {:#}", e);
    }
    result
}
