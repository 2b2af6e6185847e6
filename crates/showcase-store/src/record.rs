//! Untyped rows

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// A row as exchanged with the store: field name to JSON value
pub type Record = Map<String, Value>;

/// Build a record from `(field, value)` pairs
///
/// # Examples
///
/// ```
/// use showcase_store::fields;
///
/// let matching = fields([("user_id", "u1"), ("project_id", "p1")]);
/// assert_eq!(matching.len(), 2);
/// ```
pub fn fields<I, K, V>(pairs: I) -> Record
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<Value>,
{
	pairs
		.into_iter()
		.map(|(key, value)| (key.into(), value.into()))
		.collect()
}

/// Serialize a model into a record
pub fn to_record<T: Serialize>(value: &T) -> StoreResult<Record> {
	match serde_json::to_value(value)? {
		Value::Object(map) => Ok(map),
		other => Err(StoreError::Decode(format!(
			"expected an object, got {}",
			other
		))),
	}
}

/// Map a record onto a model
pub fn from_record<T: DeserializeOwned>(record: Record) -> StoreResult<T> {
	Ok(serde_json::from_value(Value::Object(record))?)
}

/// Map every record onto a model, failing on the first malformed row
pub fn from_records<T: DeserializeOwned>(records: Vec<Record>) -> StoreResult<Vec<T>> {
	records.into_iter().map(from_record).collect()
}
