//! Types and data structures for the storage service wire format.
//!
//! This module provides the record, page, and space types exchanged with the
//! content-addressed storage service, including the tolerant page parsing the
//! service's uneven response shapes require.

mod page;
mod space;
mod upload_record;

pub use page::{PageBatch, PageRequest, UploadPage};
pub use space::SpaceInfo;
pub use upload_record::UploadRecord;
