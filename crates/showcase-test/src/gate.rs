//! Write-gated store double

use async_trait::async_trait;
use showcase_store::{
	Entity, InMemoryStore, Query, Record, RemoteStore, StoreError, StoreResult,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Semaphore;

const OPEN_PERMITS: usize = 1 << 20;

/// Store that parks every write until the test lets it through
///
/// Reads pass straight to the wrapped [`InMemoryStore`]. Each write waits for one permit;
/// [`GatedStore::release`] hands out permits one at a time and [`GatedStore::open`] lets
/// everything through from then on. Permits are taken in arrival order.
pub struct GatedStore {
	inner: Arc<InMemoryStore>,
	permits: Semaphore,
	parked: AtomicUsize,
	open: AtomicBool,
}

impl GatedStore {
	pub fn new(inner: Arc<InMemoryStore>) -> Self {
		Self {
			inner,
			permits: Semaphore::new(0),
			parked: AtomicUsize::new(0),
			open: AtomicBool::new(false),
		}
	}

	pub fn inner(&self) -> &Arc<InMemoryStore> {
		&self.inner
	}

	/// Let `writes` parked or future writes proceed
	pub fn release(&self, writes: usize) {
		self.permits.add_permits(writes);
	}

	/// Stop gating
	pub fn open(&self) {
		self.open.store(true, Ordering::SeqCst);
		self.permits.add_permits(OPEN_PERMITS);
	}

	/// Writes currently waiting for a permit
	pub fn parked(&self) -> usize {
		self.parked.load(Ordering::SeqCst)
	}

	/// Yield until at least `writes` writes are parked
	pub async fn wait_parked(&self, writes: usize) {
		while self.parked() < writes {
			tokio::task::yield_now().await;
		}
	}

	async fn pass(&self) -> StoreResult<()> {
		if self.open.load(Ordering::SeqCst) {
			return Ok(());
		}
		self.parked.fetch_add(1, Ordering::SeqCst);
		let permit = self.permits.acquire().await;
		self.parked.fetch_sub(1, Ordering::SeqCst);
		permit
			.map(|permit| permit.forget())
			.map_err(|_| StoreError::Network("gate closed".to_string()))
	}
}

#[async_trait]
impl RemoteStore for GatedStore {
	async fn select(&self, query: &Query) -> StoreResult<Vec<Record>> {
		self.inner.select(query).await
	}

	async fn count(&self, query: &Query) -> StoreResult<u64> {
		self.inner.count(query).await
	}

	async fn insert(&self, entity: Entity, fields: Record) -> StoreResult<Record> {
		self.pass().await?;
		self.inner.insert(entity, fields).await
	}

	async fn delete(&self, entity: Entity, matching: &Record) -> StoreResult<u64> {
		self.pass().await?;
		self.inner.delete(entity, matching).await
	}

	async fn update(&self, entity: Entity, matching: &Record, fields: Record) -> StoreResult<u64> {
		self.pass().await?;
		self.inner.update(entity, matching, fields).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use showcase_store::fields;

	#[tokio::test]
	async fn test_write_waits_for_release() {
		let inner = Arc::new(InMemoryStore::new());
		let gate = Arc::new(GatedStore::new(inner.clone()));

		let writer = {
			let gate = gate.clone();
			tokio::spawn(async move {
				gate.insert(Entity::Votes, fields([("user_id", "u1"), ("project_id", "p1")]))
					.await
			})
		};
		gate.wait_parked(1).await;
		assert!(inner.rows(Entity::Votes).is_empty());

		gate.release(1);
		writer.await.unwrap().unwrap();

		assert_eq!(inner.rows(Entity::Votes).len(), 1);
		assert_eq!(gate.parked(), 0);
	}

	#[tokio::test]
	async fn test_open_gate_passes_through() {
		let inner = Arc::new(InMemoryStore::new());
		let gate = GatedStore::new(inner.clone());
		gate.open();

		gate.insert(Entity::Votes, fields([("user_id", "u1"), ("project_id", "p1")]))
			.await
			.unwrap();

		assert_eq!(inner.rows(Entity::Votes).len(), 1);
	}
}
