//! High-level storage service client implementation.
//!
//! This module provides the main client interface for the storage service,
//! encapsulating HTTP transport, configuration, and error mapping.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use super::session::HttpSession;
use super::storage_config::StorageConfig;
use crate::operations::SpaceOperations;
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// High-level client for the content-addressed storage service.
///
/// The client is cheap to clone and is always passed to the code that needs
/// it; no global instance exists. Space-bound work goes through
/// [`StorageClient::session`].
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    config: Arc<StorageConfig>,
}

impl StorageClient {
    /// Creates a new storage client with the provided configuration.
    ///
    /// This builds the HTTP transport but does not perform any network I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails or the HTTP client
    /// cannot be constructed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cask_client::{Credentials, StorageClient, StorageConfig};
    /// use url::Url;
    ///
    /// let endpoint = Url::parse("https://up.storage.example").unwrap();
    /// let config = StorageConfig::new(endpoint, Credentials::new("token")).unwrap();
    /// let client = StorageClient::new(config).unwrap();
    /// ```
    pub fn new(config: StorageConfig) -> Result<Self> {
        debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint_masked(),
            "Initializing storage client"
        );

        config.validate().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
            e
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        info!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint_masked(),
            token = %config.credentials().token_masked(),
            "Storage client initialized"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Creates a session bound to the given space.
    ///
    /// The session is the capability handed to upload operations; each
    /// session addresses exactly one space.
    pub fn session(&self, space_did: impl Into<String>) -> HttpSession {
        HttpSession::new(self.clone(), space_did.into())
    }

    /// Creates a new SpaceOperations instance.
    pub fn space_operations(&self) -> SpaceOperations {
        SpaceOperations::new(self.clone())
    }

    /// Returns the client configuration.
    #[inline]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Performs an authenticated GET against the service and parses the body
    /// as JSON.
    ///
    /// Transport failures map to [`Error::Fetch`], non-success statuses to
    /// [`Error::ServerError`] (404 to [`Error::NotFound`]), and a body that
    /// is not JSON at all to [`Error::Serialization`].
    pub(crate) async fn get_json(&self, path: &[&str], query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint_join(path)?;

        let mut request = self
            .http
            .get(url.clone())
            .bearer_auth(self.config.credentials().token());
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(Self::map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(Self::map_transport_error)?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.path().to_string()));
        }

        if !status.is_success() {
            return Err(Error::ServerError {
                message: summarize_body(&body, status),
                status_code: status.as_u16(),
            });
        }

        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Joins path segments onto the configured endpoint.
    fn endpoint_join(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.config.endpoint().clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config("Endpoint cannot be a base URL".to_string()))?
            .extend(path);
        Ok(url)
    }

    fn map_transport_error(error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Fetch("request timed out".to_string())
        } else if error.is_connect() {
            Error::Fetch(format!("connection failed: {error}"))
        } else {
            Error::Http(error)
        }
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("endpoint", &self.config.endpoint_masked())
            .field("token", &self.config.credentials().token_masked())
            .field("request_timeout", &self.config.request_timeout)
            .finish()
    }
}

/// Builds a short, loggable message from an error response body.
fn summarize_body(body: &str, status: reqwest::StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
