//! Tracing subscriber setup.
//!
//! Events go to stderr; stdout is reserved for command output.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// How the subscriber should be built.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level for `gitgo` events; other crates stay at WARN
    pub level: Level,
    /// Show the event target (`gitgo::cmd` for logged git invocations)
    pub show_target: bool,
    /// Emit ANSI colour codes
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            show_target: false,
            ansi: std::io::stderr().is_terminal(),
        }
    }
}

impl TelemetryConfig {
    /// `-v` logs every git command before it runs, `-q` keeps only errors.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        let defaults = Self::default();
        if verbose {
            Self {
                level: Level::DEBUG,
                show_target: true,
                ..defaults
            }
        } else if quiet {
            Self {
                level: Level::ERROR,
                ..defaults
            }
        } else {
            defaults
        }
    }

    fn filter(&self) -> anyhow::Result<EnvFilter> {
        // RUST_LOG, when set, replaces the flag-derived level
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some_and(|v| !v.is_empty()) {
            return Ok(EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy());
        }
        Ok(EnvFilter::new(format!("warn,gitgo={}", self.level)))
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(config.show_target)
        .without_time()
        .compact();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(config.filter()?)
            .with(fmt_layer),
    )?;

    Ok(())
}
