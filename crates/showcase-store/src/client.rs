//! Timeout-bounded store client

use crate::entity::Entity;
use crate::error::{StoreError, StoreResult};
use crate::query::Query;
use crate::record::Record;
use crate::store::RemoteStore;
use async_trait::async_trait;
use showcase_conf::StoreSettings;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Decorator over any [`RemoteStore`] applying the configured request timeout
///
/// Without a timeout a request that never resolves leaves its caller pending forever.
/// An expired request is reported as [`StoreError::Timeout`]; it is not retried.
#[derive(Clone)]
pub struct StoreClient {
	inner: Arc<dyn RemoteStore>,
	timeout: Option<Duration>,
}

impl StoreClient {
	pub fn new(inner: Arc<dyn RemoteStore>, settings: &StoreSettings) -> Self {
		Self {
			inner,
			timeout: settings.request_timeout(),
		}
	}

	/// Client that waits indefinitely
	pub fn unbounded(inner: Arc<dyn RemoteStore>) -> Self {
		Self {
			inner,
			timeout: None,
		}
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	async fn bounded<T, F>(&self, operation: &'static str, entity: Entity, request: F) -> StoreResult<T>
	where
		F: Future<Output = StoreResult<T>> + Send,
	{
		let Some(limit) = self.timeout else {
			return request.await;
		};
		match tokio::time::timeout(limit, request).await {
			Ok(result) => result,
			Err(_) => {
				tracing::warn!(%entity, operation, timeout = ?limit, "store request timed out");
				Err(StoreError::Timeout(limit))
			}
		}
	}
}

#[async_trait]
impl RemoteStore for StoreClient {
	async fn select(&self, query: &Query) -> StoreResult<Vec<Record>> {
		self.bounded("select", query.entity, self.inner.select(query))
			.await
	}

	async fn count(&self, query: &Query) -> StoreResult<u64> {
		self.bounded("count", query.entity, self.inner.count(query))
			.await
	}

	async fn insert(&self, entity: Entity, fields: Record) -> StoreResult<Record> {
		self.bounded("insert", entity, self.inner.insert(entity, fields))
			.await
	}

	async fn delete(&self, entity: Entity, matching: &Record) -> StoreResult<u64> {
		self.bounded("delete", entity, self.inner.delete(entity, matching))
			.await
	}

	async fn update(&self, entity: Entity, matching: &Record, fields: Record) -> StoreResult<u64> {
		self.bounded("update", entity, self.inner.update(entity, matching, fields))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::InMemoryStore;
	use crate::record::fields;

	/// Store whose requests never resolve
	struct Unresponsive;

	#[async_trait]
	impl RemoteStore for Unresponsive {
		async fn select(&self, _query: &Query) -> StoreResult<Vec<Record>> {
			std::future::pending().await
		}

		async fn count(&self, _query: &Query) -> StoreResult<u64> {
			std::future::pending().await
		}

		async fn insert(&self, _entity: Entity, _fields: Record) -> StoreResult<Record> {
			std::future::pending().await
		}

		async fn delete(&self, _entity: Entity, _matching: &Record) -> StoreResult<u64> {
			std::future::pending().await
		}

		async fn update(&self, _entity: Entity, _matching: &Record, _fields: Record) -> StoreResult<u64> {
			std::future::pending().await
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_request_times_out() {
		let mut settings = StoreSettings::default();
		settings.request_timeout_ms = Some(500);
		let client = StoreClient::new(Arc::new(Unresponsive), &settings);

		let result = client.insert(Entity::Votes, fields([("user_id", "u1")])).await;

		assert!(matches!(result, Err(StoreError::Timeout(limit)) if limit == Duration::from_millis(500)));
	}

	#[tokio::test]
	async fn test_unbounded_client_passes_through() {
		let store = Arc::new(InMemoryStore::new());
		let client = StoreClient::unbounded(store.clone());

		client
			.insert(Entity::Votes, fields([("user_id", "u1"), ("project_id", "p1")]))
			.await
			.unwrap();

		assert_eq!(client.timeout(), None);
		assert_eq!(store.rows(Entity::Votes).len(), 1);
	}
}
