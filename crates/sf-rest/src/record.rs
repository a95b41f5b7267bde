//! Records and their wire encoding.
//!
//! A record is a flat JSON object of field name to value. Anything that can
//! be viewed as one implements [`ToRecord`]: JSON maps pass through, and any
//! `Serialize` type can be wrapped in [`Typed`].
//!
//! ```rust
//! use serde::Serialize;
//! use sfdml_rest::{ToRecord, Typed};
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Account {
//!     name: String,
//!     industry: Option<String>,
//! }
//!
//! let record = Typed(Account { name: "Acme".into(), industry: None }).to_record().unwrap();
//! assert_eq!(record["Name"], "Acme");
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// A record as sent to the org.
pub type Record = Map<String, Value>;

/// Name of the record identifier field.
pub const ID_FIELD: &str = "Id";

/// Name of the type descriptor block.
pub const ATTRIBUTES_FIELD: &str = "attributes";

/// Conversion into a [`Record`].
pub trait ToRecord {
    /// View `self` as a record.
    fn to_record(&self) -> Result<Record>;
}

impl ToRecord for Record {
    fn to_record(&self) -> Result<Record> {
        Ok(self.clone())
    }
}

impl ToRecord for Value {
    fn to_record(&self) -> Result<Record> {
        match self {
            Value::Object(map) => Ok(map.clone()),
            other => Err(not_a_record(json_kind(other))),
        }
    }
}

impl<S: std::hash::BuildHasher> ToRecord for HashMap<String, Value, S> {
    fn to_record(&self) -> Result<Record> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl ToRecord for BTreeMap<String, Value> {
    fn to_record(&self) -> Result<Record> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl<T: ToRecord + ?Sized> ToRecord for &T {
    fn to_record(&self) -> Result<Record> {
        (**self).to_record()
    }
}

/// Wrapper that turns any serializable type into a record.
///
/// The type must serialize to a JSON object; structs and maps do, while
/// sequences and scalars fail with a codec error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typed<T>(pub T);

impl<T: Serialize> ToRecord for Typed<T> {
    fn to_record(&self) -> Result<Record> {
        match serde_json::to_value(&self.0)? {
            Value::Object(map) => Ok(map),
            other => Err(not_a_record(json_kind(&other))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn not_a_record(found: &str) -> Error {
    Error::new(ErrorKind::Codec(format!(
        "record must decode into key-value pairs (a struct or map), found {}",
        found
    )))
}

/// Convert a slice of records, keeping their order.
pub fn to_record_list<R: ToRecord>(records: &[R]) -> Result<Vec<Record>> {
    records.iter().map(ToRecord::to_record).collect()
}

/// The non-empty `Id` of a record.
pub fn record_id(record: &Record) -> Result<&str> {
    match record.get(ID_FIELD).and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(Error::config("record Id not found in record data")),
    }
}

/// The non-empty value of an external-ID field.
pub fn external_id<'a>(record: &'a Record, sobject: &str, field: &str) -> Result<&'a str> {
    match record.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::config(format!(
            "external ID field {} not found in {} data; custom fields end in '__c'",
            field, sobject
        ))),
    }
}

fn with_type(mut record: Record, sobject: &str, strip: &[&str]) -> Record {
    for field in strip {
        record.remove(*field);
    }
    record.insert(ATTRIBUTES_FIELD.to_string(), json!({ "type": sobject }));
    record
}

/// Body for a single-record create: no `Id`, typed.
pub fn encode_for_insert(sobject: &str, record: Record) -> Record {
    with_type(record, sobject, &[ID_FIELD])
}

/// Body for a single-record update: the `Id` moves to the URL.
pub fn encode_for_update(sobject: &str, record: Record) -> Record {
    with_type(record, sobject, &[ID_FIELD])
}

/// Body for a single-record upsert: `Id` and the external ID move out of
/// the body, the external ID into the URL.
pub fn encode_for_upsert(sobject: &str, field: &str, record: Record) -> Record {
    with_type(record, sobject, &[ID_FIELD, field])
}

/// Collection create entry: no `Id`, typed.
pub fn encode_collection_insert(sobject: &str, record: Record) -> Record {
    with_type(record, sobject, &[ID_FIELD])
}

/// Collection update entry. The `Id` stays since it addresses the record.
pub fn encode_collection_update(sobject: &str, record: Record) -> Record {
    with_type(record, sobject, &[])
}

/// Collection upsert entry. The external ID stays since it addresses the
/// record together with the field named in the URL.
pub fn encode_collection_upsert(sobject: &str, record: Record) -> Record {
    with_type(record, sobject, &[])
}
