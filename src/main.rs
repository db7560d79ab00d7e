//! Lokachakra - terminal chat with the community-trained SLM

use std::path::PathBuf;

use clap::Parser;
use lokachakra::chat::InputLimitPolicy;
use lokachakra::config::{LayoutVariant, Settings};
use lokachakra::runner::{run_tui, AppConfig};

/// Lokachakra SLM - decentralized, community-trained chat 🤖
#[derive(Parser, Debug)]
#[command(name = "lokachakra")]
#[command(version, about, long_about = None)]
struct Args {
    /// Presentation template
    #[arg(short, long, value_enum, env = "LOKACHAKRA_LAYOUT")]
    layout: Option<LayoutVariant>,

    /// Delay before the assistant replies, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Override the compose character limit
    #[arg(long)]
    input_limit: Option<usize>,

    /// Refuse input beyond the character limit instead of only flagging it
    #[arg(long)]
    enforce_input_limit: bool,

    /// Settings file (defaults to the XDG config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the settings file before starting
    #[arg(long)]
    save_config: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
        }
    }
}

impl Args {
    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(Settings::default_config_path)
    }

    /// Settings file values, overridden by whatever was given on the command line.
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::load_default()?,
        };

        if let Some(layout) = self.layout {
            settings.layout = layout;
        }
        if let Some(delay) = self.reply_delay_ms {
            settings.reply_delay_ms = delay;
        }
        if let Some(limit) = self.input_limit {
            settings.input_limit = Some(limit);
        }
        if self.enforce_input_limit {
            settings.input_limit_policy = InputLimitPolicy::Enforced;
        }

        settings.validate()?;

        if self.save_config {
            let path = self.config_path();
            settings.save_to_path(&path)?;
            tracing::info!(path = %path.display(), "Saved settings");
        }
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;
    run_tui(AppConfig::from(&args), settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"layout": "card", "reply_delay_ms": 200}"#).unwrap();

        let args = Args::parse_from([
            "lokachakra",
            "--config",
            path.to_str().unwrap(),
            "--reply-delay-ms",
            "50",
            "--enforce-input-limit",
        ]);
        let settings = args.settings().unwrap();
        assert_eq!(settings.layout, LayoutVariant::Card);
        assert_eq!(settings.reply_delay_ms, 50);
        assert_eq!(settings.input_limit_policy, InputLimitPolicy::Enforced);
    }

    #[test]
    fn test_save_config_persists_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let args = Args::parse_from([
            "lokachakra",
            "--config",
            path.to_str().unwrap(),
            "--layout",
            "card",
            "--input-limit",
            "250",
            "--save-config",
        ]);
        let settings = args.settings().unwrap();

        let saved = Settings::load_from_path(&path).unwrap();
        assert_eq!(saved, settings);
        assert_eq!(saved.layout, LayoutVariant::Card);
        assert_eq!(saved.input_limit, Some(250));
    }

    #[test]
    fn test_invalid_override_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let args = Args::parse_from([
            "lokachakra",
            "--config",
            path.to_str().unwrap(),
            "--reply-delay-ms",
            "999999",
            "--save-config",
        ]);
        assert!(args.settings().is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let args = Args::parse_from([
            "lokachakra",
            "--config",
            path.to_str().unwrap(),
            "--input-limit",
            "0",
        ]);
        assert!(args.settings().is_err());
    }
}
