//! Error types for the pplx client
//!
//! Every failure of a completion call surfaces as a [`PplxError`]. Use
//! [`PplxError::kind`] when only the category matters.

use thiserror::Error;

/// Coarse category of a [`PplxError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidOption,
    ConflictingOptions,
    Unsupported,
    Encode,
    TransportFailure,
    UpstreamError,
    DecodeError,
    InvalidResponse,
    Config,
}

/// Main error type for the client
#[derive(Error, Debug)]
pub enum PplxError {
    /// A caller-supplied option failed local validation (never sent over the wire)
    #[error("Invalid option `{field}`: {rule}")]
    InvalidOption { field: String, rule: String },

    /// Two mutually exclusive options were both set
    #[error("Conflicting options: cannot set both `{first}` and `{second}`")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("Unsupported: {0}")]
    Unsupported(&'static str),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Network, DNS, TLS or timeout failure. Never retried.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// The API answered with a status other than 200
    #[error("Non-successful request, status={status} body={body}")]
    UpstreamError { status: String, body: String },

    #[error("Failed to decode response body: {0}")]
    DecodeError(#[source] serde_json::Error),

    /// The response parsed but is structurally incomplete
    #[error("Invalid response: `{field}` {rule}")]
    InvalidResponse { field: String, rule: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file '{path}': {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl PplxError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOption { .. } => ErrorKind::InvalidOption,
            Self::ConflictingOptions { .. } => ErrorKind::ConflictingOptions,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Encode(_) => ErrorKind::Encode,
            Self::TransportFailure(_) => ErrorKind::TransportFailure,
            Self::UpstreamError { .. } => ErrorKind::UpstreamError,
            Self::DecodeError(_) => ErrorKind::DecodeError,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Config(_) | Self::ConfigFileRead { .. } | Self::ConfigParseFailed { .. } => {
                ErrorKind::Config
            }
        }
    }
}

/// Convenience type alias for Results
pub type PplxResult<T> = Result<T, PplxError>;
