//! Space listing operations for the storage service.

use serde::Deserialize;
use tracing::{debug, error, info};

use crate::types::SpaceInfo;
use crate::{Error, Result, StorageClient, TRACING_TARGET_SPACES};

/// Wire envelope for the space listing endpoint.
#[derive(Debug, Deserialize)]
struct SpacesResponse {
    spaces: Vec<SpaceInfo>,
}

/// Space operations with a required storage client.
#[derive(Debug, Clone)]
pub struct SpaceOperations {
    client: StorageClient,
}

impl SpaceOperations {
    /// Creates new SpaceOperations with a storage client.
    pub fn new(client: StorageClient) -> Self {
        Self { client }
    }

    /// Lists all spaces the credential grants access to.
    ///
    /// # Errors
    ///
    /// Returns an error if the space listing fails.
    pub async fn list_spaces(&self) -> Result<Vec<SpaceInfo>> {
        debug!(target: TRACING_TARGET_SPACES, "Listing spaces");

        let start = std::time::Instant::now();
        let result = self.client.get_json(&["spaces"], &[]).await;
        let elapsed = start.elapsed();

        match result {
            Ok(value) => {
                let response: SpacesResponse =
                    serde_json::from_value(value).map_err(Error::Serialization)?;

                info!(
                    target: TRACING_TARGET_SPACES,
                    count = response.spaces.len(),
                    elapsed = ?elapsed,
                    "Spaces listed successfully"
                );

                Ok(response.spaces)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_SPACES,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to list spaces"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_response_deserialization() {
        let response: SpacesResponse = serde_json::from_value(serde_json::json!({
            "spaces": [
                { "did": "did:key:z6MkA", "name": "photos" },
                { "did": "did:key:z6MkB", "name": null },
            ],
        }))
        .unwrap();

        assert_eq!(response.spaces.len(), 2);
        assert_eq!(response.spaces[0].display_name(), "photos");
        assert_eq!(response.spaces[1].display_name(), "did:key:z6MkB");
    }
}
