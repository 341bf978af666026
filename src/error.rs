//! Error types for storefront
//!
//! Library code returns [`StorefrontError`]; the binary wraps it in `anyhow`
//! at the edge. Every variant belongs to one [`ErrorKind`], which is what the
//! CLI and the HTTP surface branch on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for storefront operations
pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Coarse classification of a [`StorefrontError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local file missing or unreadable. Fatal to the operation.
    Io,
    /// Transport failure or timeout talking to the RPC node.
    Network,
    /// The network explicitly rejected the request.
    Remote,
    /// Bad input or configuration caught before anything was sent.
    Local,
}

/// Main error type for storefront operations
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Deployment artifact could not be read
    #[error("cannot read artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The RPC node or the runtime rejected the call
    #[error("{name}: {message}")]
    Remote {
        name: String,
        message: String,
        payload: serde_json::Value,
    },

    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Credential file missing or malformed
    #[error("credentials for '{account_id}' unusable: {reason}")]
    Credentials { account_id: String, reason: String },

    /// Malformed account identifier
    #[error("invalid account id '{value}': {reason}")]
    InvalidAccountId { value: String, reason: String },

    /// Method not exposed by the contract interface
    #[error("method '{method}' is not exposed by contract {contract}")]
    UnknownMethod { contract: String, method: String },

    /// View method called as a change method, or the other way round
    #[error("method '{method}' is a {actual} method")]
    WrongMethodKind { method: String, actual: &'static str },

    /// Malformed or unsupported key material
    #[error("invalid key '{value}': {reason}")]
    InvalidKey { value: String, reason: String },

    /// Unparseable token or gas amount
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// A pipeline step failed after earlier steps were already deployed
    #[error("pipeline stopped at step {index} after deploying to {}: {error}", deployed.join(", "))]
    PipelineAborted {
        index: usize,
        deployed: Vec<String>,
        error: Box<StorefrontError>,
    },

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorefrontError {
    /// Build a [`StorefrontError::Remote`] from a service-provided name and message.
    pub fn remote(
        name: impl Into<String>,
        message: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::Remote {
            name: name.into(),
            message: message.into(),
            payload,
        }
    }

    /// The error underneath any pipeline wrapping
    pub fn root(&self) -> &StorefrontError {
        match self {
            Self::PipelineAborted { error, .. } => error.root(),
            err => err,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Artifact { .. } | Self::Io(_) => ErrorKind::Io,
            Self::Network(_) => ErrorKind::Network,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::PipelineAborted { error, .. } => error.kind(),
            Self::Config(_)
            | Self::InvalidConfig { .. }
            | Self::Credentials { .. }
            | Self::InvalidAccountId { .. }
            | Self::UnknownMethod { .. }
            | Self::WrongMethodKind { .. }
            | Self::InvalidKey { .. }
            | Self::InvalidAmount { .. }
            | Self::Json(_) => ErrorKind::Local,
        }
    }
}

impl From<reqwest::Error> for StorefrontError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}
