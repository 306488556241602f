//! Upload record structures for the storage service.

use jiff::Timestamp;
use jiff::civil;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

/// Default public gateway used to build directory-preview URLs.
pub(crate) const DEFAULT_GATEWAY_SUFFIX: &str = "ipfs.w3s.link";

/// A single upload known to the storage service.
///
/// Records are immutable snapshots sourced from the service; the client never
/// mutates them. The `insertedAt` value is kept as the raw wire string because
/// the service does not guarantee it is parseable, unique, or monotonic — it
/// is only used for ordering, via [`UploadRecord::inserted_at_timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    /// Content-address (CID) of the uploaded content's root.
    pub root: String,
    /// Upload size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Insertion timestamp as reported by the service.
    #[serde(default)]
    pub inserted_at: String,
    /// Shard CIDs backing this upload, when the service reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shards: Vec<String>,
}

impl UploadRecord {
    /// Creates a new UploadRecord.
    pub fn new(root: impl Into<String>, size: u64, inserted_at: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            size,
            inserted_at: inserted_at.into(),
            shards: Vec::new(),
        }
    }

    /// Sets the shard CIDs.
    pub fn with_shards(mut self, shards: Vec<String>) -> Self {
        self.shards = shards;
        self
    }

    /// Parses the insertion timestamp, if it is parseable at all.
    ///
    /// Accepts a full RFC 3339 timestamp, a civil datetime, or a bare date;
    /// zoneless values are assumed UTC. Returns `None` for anything else, in
    /// which case the record sorts after all records with parseable
    /// timestamps.
    pub fn inserted_at_timestamp(&self) -> Option<Timestamp> {
        if let Ok(ts) = self.inserted_at.parse::<Timestamp>() {
            return Some(ts);
        }

        let datetime = if let Ok(datetime) = self.inserted_at.parse::<civil::DateTime>() {
            datetime
        } else {
            let date: civil::Date = self.inserted_at.parse().ok()?;
            civil::DateTime::from(date)
        };

        datetime
            .to_zoned(TimeZone::UTC)
            .ok()
            .map(|zoned| zoned.timestamp())
    }

    /// Returns the public gateway URL serving a directory view of this
    /// upload's content tree.
    pub fn gateway_url(&self) -> String {
        format!("https://{}.{}/", self.root, DEFAULT_GATEWAY_SUFFIX)
    }
}
