#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "cask_client::client";
pub const TRACING_TARGET_SPACES: &str = "cask_client::spaces";
pub const TRACING_TARGET_UPLOADS: &str = "cask_client::uploads";

pub mod client;
pub mod operations;
pub mod types;

// Re-export for convenience
pub use crate::client::{Credentials, HttpSession, SpaceSession, StorageClient, StorageConfig};
pub use crate::operations::{ListUploadsResult, SpaceOperations, UploadOperations};
pub use crate::types::{PageBatch, PageRequest, SpaceInfo, UploadPage, UploadRecord};

/// Error type for storage service operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes invalid configuration parameters, missing required
    /// settings, or malformed endpoint URLs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page fetch failed before a response could be obtained.
    ///
    /// This covers network failures, timeouts, and connection errors on the
    /// request for a single page. The aggregation call that issued the fetch
    /// fails as a whole; no partial results are returned.
    #[error("Page fetch failed: {0}")]
    Fetch(String),

    /// The service answered a page fetch with a non-success status.
    #[error("Server error: {message} (status: {status_code})")]
    ServerError {
        /// Error message derived from the response.
        message: String,
        /// HTTP status code.
        status_code: u16,
    },

    /// Resource not found.
    ///
    /// This occurs when addressing a space the service does not know about.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization error.
    ///
    /// This occurs when a response body is not valid JSON at all. A body that
    /// is valid JSON but of an unexpected shape is not an error; it is
    /// handled as a malformed page by the upload aggregator.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying HTTP client error.
    ///
    /// This wraps errors from the HTTP transport that don't fit into the
    /// other specific categories.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns whether this error indicates a failed page fetch.
    ///
    /// Both transport failures and non-success server responses count; either
    /// one aborts an aggregation sweep without partial results.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Fetch(_) | Error::ServerError { .. } | Error::Http(_)
        )
    }

    /// Returns whether this error indicates a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Returns whether a caller-owned retry is likely to succeed.
    ///
    /// The client never retries internally; this only advises callers that
    /// implement their own retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Fetch(_) => true,
            Error::ServerError { status_code, .. } => {
                // Retry on 5xx errors (server issues) but not 4xx (client issues)
                *status_code >= 500 && *status_code < 600
            }
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Config(_) => false,
            Error::NotFound(_) => false,
            Error::Serialization(_) => false,
        }
    }
}

/// Specialized [`Result`] type for storage service operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
