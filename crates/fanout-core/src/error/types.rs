//! Core error types

use thiserror::Error;

/// Result type alias for fanout operations
pub type FanoutResult<T> = Result<T, FanoutError>;

/// Main error type for fanout
#[derive(Error, Debug, Clone)]
pub enum FanoutError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// The build description could not be queried or understood
    #[error("Enumeration error: {message}")]
    Enumeration {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// A configuration value failed validation
    #[error("Invalid {field}: {message}")]
    InvalidInput { message: String, field: String },

    /// Every worker hung up before all results were delivered
    #[error("Result channel closed after {received} of {expected} results")]
    ResultChannelClosed { received: usize, expected: usize },
}

impl FanoutError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "FANOUT_CONFIG",
            Self::Enumeration { .. } => "FANOUT_ENUMERATION",
            Self::Io { .. } => "FANOUT_IO",
            Self::InvalidInput { .. } => "FANOUT_INVALID_INPUT",
            Self::ResultChannelClosed { .. } => "FANOUT_CHANNEL_CLOSED",
        }
    }

    /// The command, path or field the error refers to
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Enumeration { context, .. } => context.as_deref(),
            Self::Io { path, .. } => path.as_deref(),
            Self::InvalidInput { field, .. } => Some(field),
            Self::ResultChannelClosed { .. } => None,
        }
    }
}
