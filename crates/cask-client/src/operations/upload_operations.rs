//! Upload listing operations, including full-sweep aggregation.
//!
//! The aggregator walks the service's pagination cursor sequentially: page
//! N+1 can only be requested once page N has answered, because the cursor is
//! only known then. Each sweep is independent and holds no state between
//! invocations.

use std::cmp::Ordering;

use jiff::Timestamp;
use tracing::{debug, error, info, warn};

use crate::client::SpaceSession;
use crate::types::{PageRequest, UploadPage, UploadRecord};
use crate::{Result, TRACING_TARGET_UPLOADS};

/// Outcome of a full upload listing sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUploadsResult {
    /// All records across every page, sorted by insertion time, most recent
    /// first.
    pub uploads: Vec<UploadRecord>,
    /// Number of pages fetched, including unrecognized ones.
    pub pages_fetched: usize,
    /// Number of pages that arrived in no recognizable shape and contributed
    /// zero records.
    pub malformed_pages: usize,
}

impl ListUploadsResult {
    /// Returns the number of aggregated records.
    pub fn len(&self) -> usize {
        self.uploads.len()
    }

    /// Returns whether the sweep yielded no records.
    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }
}

/// Upload operations over a space-bound session.
///
/// Generic over [`SpaceSession`] so the aggregation logic can be exercised
/// without a live service.
#[derive(Debug, Clone)]
pub struct UploadOperations<S> {
    session: S,
    page_size: Option<usize>,
}

impl<S: SpaceSession> UploadOperations<S> {
    /// Creates new UploadOperations over a session.
    pub fn new(session: S) -> Self {
        Self {
            session,
            page_size: None,
        }
    }

    /// Sets a page size hint forwarded with every page request.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Fetches a single page of uploads.
    ///
    /// For callers that paginate themselves; [`list_all`](Self::list_all)
    /// covers the common case of wanting everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the page fetch fails.
    pub async fn list_page(&self, request: &PageRequest) -> Result<UploadPage> {
        self.session.fetch_page(request).await
    }

    /// Retrieves every upload record in the space by following the
    /// pagination cursor until the service stops returning one.
    ///
    /// Pages that arrive in no recognizable shape contribute zero records:
    /// they are logged at warn level and counted on the result, and the
    /// sweep continues with that page's cursor. Records are returned sorted
    /// by insertion time, most recent first; records with unparseable
    /// timestamps sort last, and ties keep their page-retrieval order (the
    /// sort is stable).
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails. The sweep is not retried
    /// and no partial listing is returned.
    pub async fn list_all(&self) -> Result<ListUploadsResult> {
        let space = self.session.space();
        debug!(
            target: TRACING_TARGET_UPLOADS,
            space = %space,
            "Listing all uploads"
        );

        let start = std::time::Instant::now();
        let mut uploads: Vec<UploadRecord> = Vec::new();
        let mut pages_fetched = 0usize;
        let mut malformed_pages = 0usize;
        let mut cursor: Option<String> = None;

        loop {
            let mut request = PageRequest::new();
            if let Some(cursor) = cursor.take() {
                request = request.with_cursor(cursor);
            }
            if let Some(size) = self.page_size {
                request = request.with_size(size);
            }

            let page = self.session.fetch_page(&request).await.map_err(|e| {
                error!(
                    target: TRACING_TARGET_UPLOADS,
                    space = %space,
                    page = pages_fetched + 1,
                    error = %e,
                    "Upload page fetch failed, aborting sweep"
                );
                e
            })?;
            pages_fetched += 1;

            if !page.batch.is_recognized() {
                malformed_pages += 1;
                warn!(
                    target: TRACING_TARGET_UPLOADS,
                    space = %space,
                    page = pages_fetched,
                    "Upload page had no recognizable batch shape, skipping"
                );
            }

            uploads.extend(page.batch.into_records());
            cursor = page.cursor;

            if cursor.is_none() {
                break;
            }
        }

        sort_most_recent_first(&mut uploads);

        info!(
            target: TRACING_TARGET_UPLOADS,
            space = %space,
            uploads = uploads.len(),
            pages = pages_fetched,
            malformed_pages,
            elapsed = ?start.elapsed(),
            "Upload listing complete"
        );

        Ok(ListUploadsResult {
            uploads,
            pages_fetched,
            malformed_pages,
        })
    }

    /// Like [`list_all`](Self::list_all), returning just the sorted records.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn list_all_uploads(&self) -> Result<Vec<UploadRecord>> {
        Ok(self.list_all().await?.uploads)
    }
}

/// Stable-sorts records by insertion time, most recent first.
///
/// Timestamps are parsed once per record before comparing. Unparseable
/// timestamps order after every parseable one; equal keys keep their input
/// order.
fn sort_most_recent_first(uploads: &mut Vec<UploadRecord>) {
    let mut keyed: Vec<(Option<Timestamp>, UploadRecord)> = std::mem::take(uploads)
        .into_iter()
        .map(|record| (record.inserted_at_timestamp(), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    *uploads = keyed.into_iter().map(|(_, record)| record).collect();
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::types::PageBatch;
    use crate::Error;

    /// In-memory session that serves a scripted sequence of outcomes.
    struct ScriptedSession {
        outcomes: Mutex<Vec<Result<UploadPage>>>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSession {
        fn new(outcomes: Vec<Result<UploadPage>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn from_bodies(bodies: Vec<serde_json::Value>) -> Self {
            Self::new(
                bodies
                    .into_iter()
                    .map(|body| Ok(UploadPage::from_value(&body)))
                    .collect(),
            )
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpaceSession for ScriptedSession {
        fn space(&self) -> &str {
            "did:key:z6MkTest"
        }

        async fn fetch_page(&self, request: &PageRequest) -> Result<UploadPage> {
            self.requests.lock().unwrap().push(request.clone());
            let mut outcomes = self.outcomes.lock().unwrap();
            assert!(!outcomes.is_empty(), "fetched past the scripted pages");
            outcomes.remove(0)
        }
    }

    fn record(root: &str, inserted_at: &str) -> serde_json::Value {
        json!({ "root": root, "size": 100, "insertedAt": inserted_at })
    }

    #[tokio::test]
    async fn test_two_page_sweep_end_to_end() {
        let session = ScriptedSession::from_bodies(vec![
            json!({
                "results": [
                    record("cid-a", "2024-01-01T00:00:00Z"),
                    record("cid-b", "2024-01-02T00:00:00Z"),
                ],
                "cursor": "x",
            }),
            json!({
                "results": [record("cid-c", "2024-01-03T00:00:00Z")],
                "cursor": null,
            }),
        ]);

        let ops = UploadOperations::new(session);
        let result = ops.list_all().await.unwrap();

        assert_eq!(result.pages_fetched, 2);
        assert_eq!(result.malformed_pages, 0);
        let roots: Vec<&str> = result.uploads.iter().map(|u| u.root.as_str()).collect();
        // Union of both pages, sorted most recent first
        assert_eq!(roots, vec!["cid-c", "cid-b", "cid-a"]);

        // Second request carried the first page's cursor
        let requests = ops.session.requests();
        assert_eq!(requests[0].cursor, None);
        assert_eq!(requests[1].cursor.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_first_page_without_cursor_terminates() {
        let session = ScriptedSession::from_bodies(vec![json!({
            "results": [record("cid-a", "2024-01-01T00:00:00Z")],
        })]);

        let ops = UploadOperations::new(session);
        let result = ops.list_all().await.unwrap();

        assert_eq!(result.pages_fetched, 1);
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let session = ScriptedSession::from_bodies(vec![json!({ "results": [] })]);

        let ops = UploadOperations::new(session);
        let result = ops.list_all().await.unwrap();

        assert!(result.is_empty());
        assert_eq!(result.pages_fetched, 1);
        assert_eq!(result.malformed_pages, 0);
    }

    #[tokio::test]
    async fn test_ok_envelope_page_aggregates_identically() {
        let session = ScriptedSession::from_bodies(vec![
            json!({
                "results": [record("cid-a", "2024-01-01T00:00:00Z")],
                "cursor": "x",
            }),
            json!({
                "ok": { "results": [record("cid-b", "2024-01-02T00:00:00Z")] },
            }),
        ]);

        let ops = UploadOperations::new(session);
        let result = ops.list_all().await.unwrap();

        let roots: Vec<&str> = result.uploads.iter().map(|u| u.root.as_str()).collect();
        assert_eq!(roots, vec!["cid-b", "cid-a"]);
        assert_eq!(result.malformed_pages, 0);
    }

    #[tokio::test]
    async fn test_malformed_page_skipped_and_sweep_continues() {
        let session = ScriptedSession::from_bodies(vec![
            json!({
                "results": [record("cid-a", "2024-01-01T00:00:00Z")],
                "cursor": "x",
            }),
            // No recognizable batch, but a cursor: the sweep must continue
            json!({ "unexpected": true, "cursor": "y" }),
            json!({
                "results": [record("cid-b", "2024-01-02T00:00:00Z")],
            }),
        ]);

        let ops = UploadOperations::new(session);
        let result = ops.list_all().await.unwrap();

        assert_eq!(result.pages_fetched, 3);
        assert_eq!(result.malformed_pages, 1);
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_discards_partial_accumulation() {
        let page = |cursor: &str, root: &str| {
            Ok(UploadPage::from_value(&json!({
                "results": [record(root, "2024-01-01T00:00:00Z")],
                "cursor": cursor,
            })))
        };

        let session = ScriptedSession::new(vec![
            page("c1", "cid-a"),
            page("c2", "cid-b"),
            Err(Error::Fetch("connection reset".into())),
            page("c4", "cid-d"),
            page("", "cid-e"),
        ]);

        let ops = UploadOperations::new(session);
        let err = ops.list_all().await.unwrap_err();

        assert!(err.is_fetch_error());
        // Pages 4 and 5 were never requested
        assert_eq!(ops.session.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_sort_most_recent_first() {
        let session = ScriptedSession::from_bodies(vec![json!({
            "results": [
                record("jan", "2024-01-01"),
                record("mar", "2024-03-01"),
                record("feb", "2024-02-01"),
            ],
        })]);

        let ops = UploadOperations::new(session);
        let uploads = ops.list_all_uploads().await.unwrap();

        let roots: Vec<&str> = uploads.iter().map(|u| u.root.as_str()).collect();
        assert_eq!(roots, vec!["mar", "feb", "jan"]);
    }

    #[tokio::test]
    async fn test_unparseable_timestamps_sort_last_and_stable() {
        let session = ScriptedSession::from_bodies(vec![json!({
            "results": [
                record("bad-1", "garbage"),
                record("new", "2024-03-01T00:00:00Z"),
                record("bad-2", ""),
                record("old", "2024-01-01T00:00:00Z"),
            ],
        })]);

        let ops = UploadOperations::new(session);
        let uploads = ops.list_all_uploads().await.unwrap();

        let roots: Vec<&str> = uploads.iter().map(|u| u.root.as_str()).collect();
        assert_eq!(roots, vec!["new", "old", "bad-1", "bad-2"]);
    }

    #[tokio::test]
    async fn test_page_size_hint_forwarded() {
        let session = ScriptedSession::from_bodies(vec![json!({ "results": [] })]);

        let ops = UploadOperations::new(session).with_page_size(25);
        ops.list_all().await.unwrap();

        let requests = ops.session.requests();
        assert_eq!(requests[0].size, Some(25));
    }

    #[tokio::test]
    async fn test_list_page_passthrough() {
        let session = ScriptedSession::from_bodies(vec![json!({
            "results": [record("cid-a", "2024-01-01T00:00:00Z")],
            "cursor": "next",
        })]);

        let ops = UploadOperations::new(session);
        let page = ops.list_page(&PageRequest::new()).await.unwrap();

        assert!(matches!(page.batch, PageBatch::Results(_)));
        assert_eq!(page.cursor.as_deref(), Some("next"));
    }
}
