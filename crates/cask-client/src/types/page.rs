//! Page structures for cursor-based upload listing.
//!
//! The storage service is not consistent about how it frames a page of upload
//! records: some deployments answer with a top-level `results` array, others
//! wrap it in an `ok` success envelope. Parsing here attempts the known
//! shapes in a fixed priority order and classifies anything else as
//! unrecognized instead of failing, so a single odd page cannot abort a
//! listing sweep.

use serde::Serialize;
use serde_json::Value;

use crate::types::UploadRecord;

/// Request parameters for fetching a single page of uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Opaque cursor returned by the previous page, if any.
    ///
    /// Absent on the first request of a sweep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size hint; the service may ignore it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl PageRequest {
    /// Creates an empty request for the first page of a sweep.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pagination cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Sets the page size hint.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

/// The record batch carried by a page, tagged by the shape it arrived in.
///
/// Shapes are attempted in declaration order: a top-level `results` array
/// wins over an `ok.results` envelope, and everything else is
/// [`Unrecognized`](PageBatch::Unrecognized).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBatch {
    /// Records found under a top-level `results` array.
    Results(Vec<UploadRecord>),
    /// Records found under the `ok.results` success envelope.
    Enveloped(Vec<UploadRecord>),
    /// Neither known shape was present and decodable.
    Unrecognized,
}

impl PageBatch {
    /// Returns the records in this batch, in page order.
    ///
    /// An unrecognized batch contributes no records.
    pub fn into_records(self) -> Vec<UploadRecord> {
        match self {
            PageBatch::Results(records) | PageBatch::Enveloped(records) => records,
            PageBatch::Unrecognized => Vec::new(),
        }
    }

    /// Returns the number of records in this batch.
    pub fn len(&self) -> usize {
        match self {
            PageBatch::Results(records) | PageBatch::Enveloped(records) => records.len(),
            PageBatch::Unrecognized => 0,
        }
    }

    /// Returns whether this batch carries no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the page arrived in a known shape.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, PageBatch::Unrecognized)
    }
}

/// One page of an upload listing, as parsed from a service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPage {
    /// The record batch, tagged by the shape it was found in.
    pub batch: PageBatch,
    /// Cursor for the next page, when the service signals one exists.
    pub cursor: Option<String>,
}

impl UploadPage {
    /// Creates a page from an already-extracted batch and cursor.
    pub fn new(batch: PageBatch, cursor: Option<String>) -> Self {
        Self { batch, cursor }
    }

    /// Parses a page from a raw JSON response body.
    ///
    /// The batch is extracted by trying known shapes in priority order:
    /// a top-level `results` array first, then `ok.results`. A body matching
    /// neither yields an [`PageBatch::Unrecognized`] batch rather than an
    /// error; the caller decides how loudly to complain.
    ///
    /// The cursor is read from the top-level `cursor` field. Absent, null,
    /// non-string, and empty-string cursors all mean the listing is
    /// exhausted.
    pub fn from_value(value: &Value) -> Self {
        let batch = Self::extract_batch(value);
        let cursor = Self::extract_cursor(value);
        Self { batch, cursor }
    }

    /// Returns whether the service signaled a further page.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    fn extract_batch(value: &Value) -> PageBatch {
        if let Some(records) = Self::decode_records(value.get("results")) {
            return PageBatch::Results(records);
        }

        let enveloped = value.get("ok").and_then(|ok| ok.get("results"));
        if let Some(records) = Self::decode_records(enveloped) {
            return PageBatch::Enveloped(records);
        }

        PageBatch::Unrecognized
    }

    /// Decodes a candidate `results` value into records.
    ///
    /// Non-arrays and arrays with undecodable elements both yield `None`;
    /// a page either decodes wholesale or counts as unrecognized.
    fn decode_records(candidate: Option<&Value>) -> Option<Vec<UploadRecord>> {
        let candidate = candidate?;
        if !candidate.is_array() {
            return None;
        }
        serde_json::from_value(candidate.clone()).ok()
    }

    fn extract_cursor(value: &Value) -> Option<String> {
        value
            .get("cursor")
            .and_then(Value::as_str)
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_owned)
    }
}
