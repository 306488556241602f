//! Storage service authentication credentials.

use serde::{Deserialize, Serialize};

/// Bearer credential for the storage service.
///
/// The token is minted by the service out of band; the client only carries
/// it. Login and plan-management flows are owned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// API token presented as a bearer credential.
    /// This field is marked as sensitive and will be masked in debug output.
    #[serde(skip_serializing)]
    pub token: String,
}

impl Credentials {
    /// Creates new credentials from an API token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cask_client::Credentials;
    ///
    /// let credentials = Credentials::new("csk_0123456789abcdef");
    /// ```
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the API token.
    #[inline]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns a masked version of the token for logging.
    ///
    /// This shows only the first 4 characters followed by asterisks.
    pub fn token_masked(&self) -> String {
        if self.token.len() <= 4 {
            "*".repeat(self.token.len())
        } else {
            format!("{}***", &self.token[..4])
        }
    }
}
