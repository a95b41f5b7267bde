//! SOQL query result pages.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// One page of query results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T = Record> {
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    pub done: bool,
    #[serde(rename = "nextRecordsUrl", default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,
    pub records: Vec<T>,
}

impl<T> QueryResult<T> {
    /// Returns true if more pages are available.
    pub fn has_more(&self) -> bool {
        !self.done && self.next_records_url.is_some()
    }
}
