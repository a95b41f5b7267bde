//! SObject Collections for batch operations.

use serde::{Deserialize, Serialize, Serializer};

use crate::record::Record;
use crate::sobject::SalesforceError;

/// Most records a single collection request may carry.
pub const MAX_COLLECTION_SIZE: usize = 200;

/// Request body for SObject Collections create/update/upsert.
///
/// `allOrNone` goes on the wire as the string `"true"` or `"false"`.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionRequest {
    #[serde(rename = "allOrNone", serialize_with = "bool_as_string")]
    pub all_or_none: bool,
    pub records: Vec<Record>,
}

fn bool_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Result of a collection operation, one per input record, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectionResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
    #[serde(default)]
    pub created: Option<bool>,
}

/// One record that failed inside a collection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position of the record in the submitted batch.
    pub index: usize,
    /// Errors the org reported for it.
    pub errors: Vec<SalesforceError>,
}

/// Collection call where at least one record failed.
///
/// Lists every failing record, not just the first, and keeps the full result
/// list so callers can see which records did succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub failures: Vec<RecordFailure>,
    pub results: Vec<CollectionResult>,
}

impl BatchFailure {
    /// Indices of the failed records, ascending.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.index).collect()
    }
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} records failed",
            self.failures.len(),
            self.results.len()
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}[{}]", sep, failure.index)?;
            for error in &failure.errors {
                write!(f, " {}", error)?;
            }
        }
        Ok(())
    }
}

/// Split a collection response into success or a batch failure.
pub(crate) fn classify(
    results: Vec<CollectionResult>,
) -> Result<Vec<CollectionResult>, BatchFailure> {
    let failures: Vec<RecordFailure> = results
        .iter()
        .enumerate()
        .filter(|(_, result)| !result.success)
        .map(|(index, result)| RecordFailure {
            index,
            errors: result.errors.clone(),
        })
        .collect();

    if failures.is_empty() {
        Ok(results)
    } else {
        Err(BatchFailure { failures, results })
    }
}
