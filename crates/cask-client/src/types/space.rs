//! Space information structures for the storage service.

use serde::{Deserialize, Serialize};

/// Information about a storage space.
///
/// A space is a named collection of uploads, identified by its DID. The name
/// is optional; display surfaces fall back to the DID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceInfo {
    /// DID identifying the space.
    pub did: String,
    /// Human-readable space name, if one was assigned.
    pub name: Option<String>,
}

impl SpaceInfo {
    /// Creates a new SpaceInfo.
    pub fn new(did: impl Into<String>) -> Self {
        Self {
            did: did.into(),
            name: None,
        }
    }

    /// Sets the space name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the space DID.
    #[inline]
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Returns the name if assigned, otherwise the DID.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.did)
    }
}
