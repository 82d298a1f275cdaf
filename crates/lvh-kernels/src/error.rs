//! Error types for lvh-kernels

use thiserror::Error;

/// Result type alias using lvh-kernels's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Kernel catalog error types
#[derive(Error, Debug)]
pub enum Error {
    /// Requested logical version is not in the catalog
    #[error("kernel version not found, try: {}", .available.join(", "))]
    VersionNotFound {
        version: String,
        available: Vec<String>,
    },

    /// Repository string could not be split into registry and path
    #[error("Invalid repository '{repository}': {reason}")]
    InvalidRepository { repository: String, reason: String },

    /// Registry answered with a non-success status
    #[error("Registry returned {status} for {url}: {body}")]
    RegistryStatus {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    /// Registry asked for credentials in a way we cannot satisfy
    #[error("Registry authentication failed for {repository}: {message}")]
    Authentication { repository: String, message: String },

    /// Registry response body could not be decoded
    #[error("Failed to decode registry response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid URL built from registry data
    #[error("Invalid registry URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failure talking to the registry
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a repository parse error
    pub fn invalid_repository(repository: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRepository {
            repository: repository.into(),
            reason: reason.into(),
        }
    }

    /// Known versions attached to a not-found error, if this is one
    pub fn available_versions(&self) -> Option<&[String]> {
        match self {
            Self::VersionNotFound { available, .. } => Some(available),
            _ => None,
        }
    }
}
