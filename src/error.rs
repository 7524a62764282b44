//! Error types for the onboarding service.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Unknown step: {0}")]
    UnknownStep(u8),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session-store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Submission-relay errors, keyed to the user-facing message taxonomy:
/// timeout and offline get dedicated messages, everything else falls back
/// to the generic retry message. The relay's own error detail rides along
/// on `Relay` for logging and API responses.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("The request timed out. Please check your internet connection and try again.")]
    Timeout,

    #[error("You appear to be offline. Please check your internet connection and try again.")]
    Offline,

    #[error(
        "There was an error submitting your form. Please try again or contact us directly at hello@bluenode.co.za"
    )]
    Relay { status: u16, detail: Option<String> },

    #[error(
        "There was an error submitting your form. Please try again or contact us directly at hello@bluenode.co.za"
    )]
    Transport(String),
}

impl SubmitError {
    /// Classify a reqwest failure into the message taxonomy.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Offline
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Relay-provided error detail, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Relay { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
