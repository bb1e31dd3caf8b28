// Logging module - Verbosity-gated diagnostics on stderr
use crate::domain::config::DEFAULT_VERBOSITY;
use crate::domain::error::{SercatError, SercatResult};
use std::fmt::Display;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostics reporter
///
/// Carries the verbosity chosen on the command line. A message of level `n`
/// is shown when the verbosity is at least `n`; level 0 is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    verbosity: i32,
}

impl Diagnostics {
    pub fn new(verbosity: i32) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    pub fn enabled(&self, level: i32) -> bool {
        level <= 0 || self.verbosity >= level
    }

    /// Most detailed tracing level that can carry an enabled message.
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            i32::MIN..=0 => LevelFilter::ERROR,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn emit(&self, level: i32, message: impl Display) {
        if !self.enabled(level) {
            return;
        }
        match level {
            i32::MIN..=0 => tracing::error!("{}", message),
            1 => tracing::info!("{}", message),
            2 => tracing::debug!("{}", message),
            _ => tracing::trace!("{}", message),
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DEFAULT_VERBOSITY)
    }
}

/// Initialize logging system
pub fn init_logging(diagnostics: &Diagnostics) -> SercatResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(diagnostics.level_filter().into())
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false)
                .with_level(true)
                .without_time(),
        )
        .try_init()
        .map_err(|e| SercatError::io("initializing logging", io::Error::other(e)))?;

    tracing::debug!("sercat logging initialized at {}", diagnostics.level_filter());
    Ok(())
}
