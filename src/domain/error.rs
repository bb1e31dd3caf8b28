use std::path::PathBuf;
use thiserror::Error;

/// SerCat unified error type
///
/// Every variant is fatal: nothing below `main` retries or recovers.
#[derive(Error, Debug)]
pub enum SercatError {
    #[error("invalid configuration '{token}': {reason}")]
    InvalidConfiguration { token: String, reason: String },

    #[error("a non-zero port number is required")]
    MissingPort,

    #[error("configuration file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },

    #[error("error opening {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: serialport::Error,
    },

    #[error("unable to configure {device}: {source}")]
    Configure {
        device: String,
        #[source]
        source: serialport::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl SercatError {
    pub fn invalid(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Usage errors are reported together with the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::MissingPort | Self::ConfigFile { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type SercatResult<T> = Result<T, SercatError>;
