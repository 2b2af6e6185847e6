//! Remote store contract

use crate::entity::Entity;
use crate::error::StoreResult;
use crate::query::Query;
use crate::record::Record;
use async_trait::async_trait;

/// Request/response access to the remote relational store
///
/// The store is eventually consistent and offers no multi-row transactions. It arbitrates
/// concurrent writes with uniqueness constraints, reported as
/// [`StoreError::Conflict`](crate::StoreError::Conflict).
#[async_trait]
pub trait RemoteStore: Send + Sync {
	/// Rows matching `query`, with its ordering, limit and inclusions applied
	async fn select(&self, query: &Query) -> StoreResult<Vec<Record>>;

	/// Number of rows matching the filters of `query`; ordering and limit are ignored
	async fn count(&self, query: &Query) -> StoreResult<u64>;

	/// Insert a row and return it as stored
	async fn insert(&self, entity: Entity, fields: Record) -> StoreResult<Record>;

	/// Delete every row whose fields equal `matching`; `NotFound` when none matched
	async fn delete(&self, entity: Entity, matching: &Record) -> StoreResult<u64>;

	/// Overwrite `fields` on every row whose fields equal `matching`; `NotFound` when none
	/// matched
	async fn update(&self, entity: Entity, matching: &Record, fields: Record) -> StoreResult<u64>;
}
