//! Operations over spaces and their uploads.
//!
//! This module provides the high-level listing operations: enumerating a
//! user's spaces, and aggregating a space's complete upload listing across
//! the service's pagination cursor.

mod space_operations;
mod upload_operations;

pub use space_operations::SpaceOperations;
pub use upload_operations::{ListUploadsResult, UploadOperations};
