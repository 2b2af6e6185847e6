//! In-memory store backend
//!
//! Holds rows per entity and enforces the unique keys declared by
//! [`Entity::unique_keys`]. Every call is recorded so tests can assert what was (and
//! was not) sent to the store, and failures can be queued for a given operation.

use crate::entity::Entity;
use crate::error::{StoreError, StoreResult};
use crate::query::{Direction, Filter, Query};
use crate::record::{Record, to_record};
use crate::store::RemoteStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

/// Store call kinds, as recorded by [`InMemoryStore::operations`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
	Select,
	Count,
	Insert,
	Delete,
	Update,
}

impl StoreOperation {
	pub fn is_write(&self) -> bool {
		matches!(self, Self::Insert | Self::Delete | Self::Update)
	}
}

#[derive(Debug)]
struct QueuedFailure {
	operation: StoreOperation,
	entity: Entity,
	error: StoreError,
}

/// In-memory [`RemoteStore`]
#[derive(Debug, Default)]
pub struct InMemoryStore {
	tables: RwLock<HashMap<Entity, Vec<Record>>>,
	failures: Mutex<VecDeque<QueuedFailure>>,
	operations: Mutex<Vec<(StoreOperation, Entity)>>,
}

impl InMemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert rows directly, bypassing uniqueness checks and the operation log
	pub fn seed<T: Serialize>(&self, entity: Entity, rows: &[T]) -> StoreResult<()> {
		let records = rows.iter().map(to_record).collect::<StoreResult<Vec<_>>>()?;
		self.tables.write().entry(entity).or_default().extend(records);
		Ok(())
	}

	/// Snapshot of every row of `entity`
	pub fn rows(&self, entity: Entity) -> Vec<Record> {
		self.tables
			.read()
			.get(&entity)
			.cloned()
			.unwrap_or_default()
	}

	/// Number of rows of `entity` whose fields equal `matching`
	pub fn count_matching(&self, entity: Entity, matching: &Record) -> usize {
		self.tables
			.read()
			.get(&entity)
			.map(|rows| rows.iter().filter(|row| matches_fields(row, matching)).count())
			.unwrap_or(0)
	}

	/// Make the next `operation` on `entity` fail with `error`
	///
	/// Failures are consumed in the order they were queued.
	pub fn fail_next(&self, operation: StoreOperation, entity: Entity, error: StoreError) {
		self.failures.lock().push_back(QueuedFailure {
			operation,
			entity,
			error,
		});
	}

	/// Every call made so far, in order
	pub fn operations(&self) -> Vec<(StoreOperation, Entity)> {
		self.operations.lock().clone()
	}

	pub fn write_count(&self) -> usize {
		self.operations
			.lock()
			.iter()
			.filter(|(operation, _)| operation.is_write())
			.count()
	}

	pub fn clear_operations(&self) {
		self.operations.lock().clear();
	}

	fn begin(&self, operation: StoreOperation, entity: Entity) -> StoreResult<()> {
		self.operations.lock().push((operation, entity));

		let mut failures = self.failures.lock();
		let position = failures
			.iter()
			.position(|f| f.operation == operation && f.entity == entity);
		match position.and_then(|index| failures.remove(index)) {
			Some(failure) => Err(failure.error),
			None => Ok(()),
		}
	}

	fn filtered(&self, query: &Query) -> StoreResult<Vec<Record>> {
		let tables = self.tables.read();
		let mut rows: Vec<Record> = tables
			.get(&query.entity)
			.map(|rows| {
				rows.iter()
					.filter(|row| query.filters.iter().all(|filter| matches_filter(row, filter)))
					.cloned()
					.collect()
			})
			.unwrap_or_default();

		if let Some(order) = &query.order {
			rows.sort_by(|a, b| {
				let ordering = compare_values(
					a.get(&order.field).unwrap_or(&Value::Null),
					b.get(&order.field).unwrap_or(&Value::Null),
				);
				match order.direction {
					Direction::Asc => ordering,
					Direction::Desc => ordering.reverse(),
				}
			});
		}

		if let Some(limit) = query.limit {
			rows.truncate(limit);
		}

		for include in &query.includes {
			let referenced = tables.get(&include.entity);
			for row in rows.iter_mut() {
				let Some(key) = row.get(&include.local_field).cloned() else {
					continue;
				};
				let joined = referenced.and_then(|candidates| {
					candidates
						.iter()
						.find(|candidate| candidate.get(&include.foreign_field) == Some(&key))
				});
				if let Some(joined) = joined {
					row.insert(include.alias.clone(), Value::Object(joined.clone()));
				}
			}
		}

		Ok(rows)
	}
}

#[async_trait]
impl RemoteStore for InMemoryStore {
	async fn select(&self, query: &Query) -> StoreResult<Vec<Record>> {
		self.begin(StoreOperation::Select, query.entity)?;
		self.filtered(query)
	}

	async fn count(&self, query: &Query) -> StoreResult<u64> {
		self.begin(StoreOperation::Count, query.entity)?;
		let unbounded = Query {
			order: None,
			limit: None,
			includes: Vec::new(),
			..query.clone()
		};
		Ok(self.filtered(&unbounded)?.len() as u64)
	}

	async fn insert(&self, entity: Entity, fields: Record) -> StoreResult<Record> {
		self.begin(StoreOperation::Insert, entity)?;
		let mut tables = self.tables.write();
		let rows = tables.entry(entity).or_default();

		for key in entity.unique_keys() {
			if !key.iter().all(|field| fields.contains_key(*field)) {
				continue;
			}
			let duplicate = rows
				.iter()
				.any(|row| key.iter().all(|field| row.get(*field) == fields.get(*field)));
			if duplicate {
				return Err(StoreError::Conflict {
					entity,
					message: format!("duplicate ({})", key.join(", ")),
				});
			}
		}

		rows.push(fields.clone());
		Ok(fields)
	}

	async fn delete(&self, entity: Entity, matching: &Record) -> StoreResult<u64> {
		self.begin(StoreOperation::Delete, entity)?;
		let mut tables = self.tables.write();
		let rows = tables.entry(entity).or_default();

		let before = rows.len();
		rows.retain(|row| !matches_fields(row, matching));
		let removed = (before - rows.len()) as u64;

		if removed == 0 {
			return Err(StoreError::NotFound {
				entity,
				key: describe(matching),
			});
		}
		Ok(removed)
	}

	async fn update(&self, entity: Entity, matching: &Record, fields: Record) -> StoreResult<u64> {
		self.begin(StoreOperation::Update, entity)?;
		let mut tables = self.tables.write();
		let rows = tables.entry(entity).or_default();

		let mut updated = 0;
		for row in rows.iter_mut().filter(|row| matches_fields(row, matching)) {
			for (field, value) in &fields {
				row.insert(field.clone(), value.clone());
			}
			updated += 1;
		}

		if updated == 0 {
			return Err(StoreError::NotFound {
				entity,
				key: describe(matching),
			});
		}
		Ok(updated)
	}
}

fn matches_fields(row: &Record, matching: &Record) -> bool {
	matching
		.iter()
		.all(|(field, value)| row.get(field).unwrap_or(&Value::Null) == value)
}

fn matches_filter(row: &Record, filter: &Filter) -> bool {
	match filter {
		Filter::Eq { field, value } => row.get(field).unwrap_or(&Value::Null) == value,
		Filter::In { field, values } => {
			let actual = row.get(field).unwrap_or(&Value::Null);
			values.iter().any(|value| value == actual)
		}
	}
}

/// Order two field values: numbers numerically, RFC 3339 timestamps chronologically,
/// everything else by string form. Nulls sort first.
fn compare_values(a: &Value, b: &Value) -> Ordering {
	match (a, b) {
		(Value::Null, Value::Null) => Ordering::Equal,
		(Value::Null, _) => Ordering::Less,
		(_, Value::Null) => Ordering::Greater,
		(Value::Number(x), Value::Number(y)) => {
			let x = x.as_f64().unwrap_or(f64::NAN);
			let y = y.as_f64().unwrap_or(f64::NAN);
			x.partial_cmp(&y).unwrap_or(Ordering::Equal)
		}
		(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
		(Value::String(x), Value::String(y)) => {
			match (
				x.parse::<DateTime<Utc>>().ok(),
				y.parse::<DateTime<Utc>>().ok(),
			) {
				(Some(x), Some(y)) => x.cmp(&y),
				_ => x.cmp(y),
			}
		}
		_ => a.to_string().cmp(&b.to_string()),
	}
}

fn describe(matching: &Record) -> String {
	matching
		.iter()
		.map(|(field, value)| format!("{}={}", field, value))
		.collect::<Vec<_>>()
		.join(", ")
}
