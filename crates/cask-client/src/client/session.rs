//! Space-bound sessions for upload listing.
//!
//! A session is the single seam the upload aggregator depends on: one
//! operation that fetches one page of upload records. Keeping it a trait
//! means the aggregator is handed its session explicitly and can be driven
//! by an in-memory fake in tests.

use async_trait::async_trait;
use tracing::debug;

use super::storage_client::StorageClient;
use crate::types::{PageRequest, UploadPage};
use crate::{Result, TRACING_TARGET_UPLOADS};

/// A capability bound to one storage space, able to fetch pages of that
/// space's upload listing.
///
/// Implementations decide how a page is produced; the aggregator only ever
/// calls [`fetch_page`](SpaceSession::fetch_page) sequentially, passing the
/// cursor from the previous page. Cancellation follows the usual async
/// contract: dropping the future abandons the in-flight fetch.
#[async_trait]
pub trait SpaceSession: Send + Sync {
    /// Returns the DID of the space this session is bound to.
    fn space(&self) -> &str;

    /// Fetches a single page of upload records.
    ///
    /// # Errors
    ///
    /// Returns an error if the page could not be retrieved at all. A page
    /// that was retrieved but arrived in an unrecognized shape is not an
    /// error; it is reported through the page's batch tag.
    async fn fetch_page(&self, request: &PageRequest) -> Result<UploadPage>;
}

/// HTTP-backed [`SpaceSession`] implementation.
///
/// Created via [`StorageClient::session`]; holds a clone of the client and
/// the DID of the bound space.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: StorageClient,
    space: String,
}

impl HttpSession {
    pub(crate) fn new(client: StorageClient, space: String) -> Self {
        Self { client, space }
    }
}

#[async_trait]
impl SpaceSession for HttpSession {
    fn space(&self) -> &str {
        &self.space
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<UploadPage> {
        debug!(
            target: TRACING_TARGET_UPLOADS,
            space = %self.space,
            cursor = request.cursor.as_deref(),
            "Fetching upload page"
        );

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(cursor) = &request.cursor {
            query.push(("cursor", cursor.clone()));
        }
        if let Some(size) = request.size {
            query.push(("size", size.to_string()));
        }

        let value = self
            .client
            .get_json(&["spaces", &self.space, "uploads"], &query)
            .await?;
        let page = UploadPage::from_value(&value);

        debug!(
            target: TRACING_TARGET_UPLOADS,
            space = %self.space,
            records = page.batch.len(),
            recognized = page.batch.is_recognized(),
            has_more = page.has_more(),
            "Upload page fetched"
        );

        Ok(page)
    }
}
