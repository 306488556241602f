//! Storage service client and session management.
//!
//! This module provides the HTTP client for the storage service, its
//! configuration and credential handling, and the [`SpaceSession`] seam the
//! upload aggregator is written against. The client is always passed in
//! explicitly; nothing here reaches into ambient global state.

mod credentials;
mod session;
mod storage_client;
mod storage_config;

pub use credentials::Credentials;
pub use session::{HttpSession, SpaceSession};
pub use storage_client::StorageClient;
pub use storage_config::StorageConfig;
