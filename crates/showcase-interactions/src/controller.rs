//! Mutation controller
//!
//! Applies vote and bookmark toggles optimistically against the view's [`EntityCache`](crate::EntityCache),
//! writes them to the store and reconciles the cache with the outcome.
//!
//! ## Ordering
//!
//! Each toggle flips the displayed state immediately and takes a new generation for its
//! key. Writes for one key run one at a time. A request that is no longer the latest
//! generation when its turn comes issues no I/O at all, and a request overtaken while its
//! writes were in flight leaves the cache untouched. Only the latest request commits or
//! rolls back, so out-of-order completions cannot make the displayed state flicker. A
//! rollback returns to the outcome of the last write sequence that completed, so a vote
//! written by an overtaken request stays visible.
//!
//! Writes are derived from the desired state and what the store is known to hold for the
//! key, not from the toggle count, so a burst of toggles collapses to at most one write
//! sequence reflecting the final desired state.

use crate::cache::SharedCache;
use crate::state::{MutationAction, MutationEvent, MutationKey, MutationKind, MutationPhase, reduce};
use parking_lot::Mutex;
use showcase_core::{Bookmark, ProjectId, Result, SessionContext, ShowcaseError, ViewScope, Vote};
use showcase_store::{Entity, ProjectCounter, Repository, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, broadcast};

const EVENT_CAPACITY: usize = 64;

/// Result of a toggle that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
	/// The store now holds `active` and the cache confirms it
	Committed { active: bool },
	/// A newer toggle for the same key took over; it owns the outcome
	Superseded,
	/// The view or the project left before the result could be applied
	Discarded,
}

/// What the store is known to hold for one key
#[derive(Debug, Default)]
struct StoreTruth {
	/// Cache epoch the values were read from; `None` until first used
	epoch: Option<u64>,
	active: bool,
	votes_count: u64,
	/// Votes from everyone but the session user
	others: u64,
	/// State of the last write sequence that completed, or the seeded state
	settled: bool,
}

/// Last consistent relationship and counter for a key
#[derive(Debug, Clone, Copy)]
struct Settled {
	active: bool,
	votes_count: Option<u64>,
}

impl Settled {
	fn of(kind: MutationKind, truth: &StoreTruth) -> Self {
		Self {
			active: truth.settled,
			votes_count: (kind == MutationKind::Vote)
				.then(|| truth.others.saturating_add(u64::from(truth.settled))),
		}
	}
}

#[derive(Debug, Default)]
struct KeyEntry {
	generation: u64,
	phase: MutationPhase,
	writer: Arc<AsyncMutex<StoreTruth>>,
}

/// Per-view controller for toggle-style mutations
///
/// # Examples
///
/// ```rust,ignore
/// let controller = MutationController::new(session, repository, cache, scope);
/// let mut events = controller.subscribe();
///
/// match controller.toggle_vote(project_id).await {
/// 	Ok(ToggleOutcome::Committed { active }) => println!("voted: {}", active),
/// 	Ok(_) => {}
/// 	Err(error) if error.is_recoverable() => println!("{}", error),
/// 	Err(error) => return Err(error),
/// }
/// ```
pub struct MutationController {
	session: Arc<SessionContext>,
	repository: Repository,
	cache: SharedCache,
	scope: ViewScope,
	keys: Mutex<HashMap<MutationKey, KeyEntry>>,
	views: Mutex<HashMap<ProjectId, Arc<AsyncMutex<()>>>>,
	events: broadcast::Sender<MutationEvent>,
}

impl MutationController {
	pub fn new(
		session: Arc<SessionContext>,
		repository: Repository,
		cache: SharedCache,
		scope: ViewScope,
	) -> Self {
		let (events, _) = broadcast::channel(EVENT_CAPACITY);
		Self {
			session,
			repository,
			cache,
			scope,
			keys: Mutex::new(HashMap::new()),
			views: Mutex::new(HashMap::new()),
			events,
		}
	}

	pub fn cache(&self) -> &SharedCache {
		&self.cache
	}

	pub fn scope(&self) -> &ViewScope {
		&self.scope
	}

	/// Receive every phase change from now on
	pub fn subscribe(&self) -> broadcast::Receiver<MutationEvent> {
		self.events.subscribe()
	}

	/// Current phase of a key
	pub fn phase(&self, key: &MutationKey) -> MutationPhase {
		self.keys
			.lock()
			.get(key)
			.map(|entry| entry.phase)
			.unwrap_or_default()
	}

	/// Flip the session user's vote on `project`
	///
	/// The displayed flag and `votes_count` change before any I/O. On failure both revert
	/// and the error is returned; nothing is retried.
	pub async fn toggle_vote(&self, project: ProjectId) -> Result<ToggleOutcome> {
		self.toggle(project, MutationKind::Vote).await
	}

	/// Flip the session user's bookmark on `project`
	pub async fn toggle_bookmark(&self, project: ProjectId) -> Result<ToggleOutcome> {
		self.toggle(project, MutationKind::Bookmark).await
	}

	/// Remove `project` from the session user's bookmarks
	///
	/// A project that is not displayed as bookmarked is left alone.
	pub async fn remove_bookmark(&self, project: ProjectId) -> Result<ToggleOutcome> {
		let bookmarked = self
			.cache
			.read()
			.displayed_flag(project, MutationKind::Bookmark)
			.ok_or_else(|| project_not_found(project))?;
		if !bookmarked {
			return Ok(ToggleOutcome::Committed { active: false });
		}
		self.toggle_bookmark(project).await
	}

	/// Count one view of `project`
	///
	/// Not optimistic: the cache changes only after the store accepted the new count.
	/// Calls for one project are serialized within this controller; views counted by
	/// other clients at the same time are overwritten, the last write wins.
	pub async fn record_view(&self, project: ProjectId) -> Result<u64> {
		self.scope.ensure_alive()?;
		let turn = self.views.lock().entry(project).or_default().clone();
		let _turn = turn.lock().await;
		self.scope.ensure_alive()?;
		let current = self
			.cache
			.read()
			.confirmed(project)
			.map(|cached| cached.project.views_count)
			.ok_or_else(|| project_not_found(project))?;
		let views = current.saturating_add(1);

		match self
			.repository
			.set_counter(project, ProjectCounter::Views, views)
			.await
		{
			Ok(()) => {
				if self.scope.is_alive() {
					self.cache.write().set_views(project, views);
				}
				Ok(views)
			}
			Err(error) => {
				if is_project_gone(&error) && self.scope.is_alive() {
					self.cache.write().evict(project);
				}
				tracing::warn!(%project, %error, "recording view failed");
				Err(error.into())
			}
		}
	}

	async fn toggle(&self, project: ProjectId, kind: MutationKind) -> Result<ToggleOutcome> {
		let user = self.session.require_user()?;
		self.scope.ensure_alive()?;
		let key = MutationKey::new(user, project, kind);

		let (generation, desired, writer) = self.begin(key)?;
		tracing::debug!(%project, %kind, generation, desired, "toggle issued");

		let mut truth = writer.lock().await;
		if !self.is_latest(&key, generation) {
			tracing::debug!(%project, %kind, generation, "toggle superseded before writing");
			return Ok(ToggleOutcome::Superseded);
		}
		if !self.load_truth(&key, &mut truth) {
			self.discard(key);
			return Ok(ToggleOutcome::Discarded);
		}

		let result = self.write(key, desired, &mut truth).await;
		let settled = Settled::of(key.kind, &truth);
		drop(truth);

		self.finish(key, generation, desired, settled, result)
	}

	/// Flip the displayed state and take the next generation for `key`
	fn begin(
		&self,
		key: MutationKey,
	) -> Result<(u64, bool, Arc<AsyncMutex<StoreTruth>>)> {
		let mut cache = self.cache.write();
		let displayed = cache
			.displayed_flag(key.project, key.kind)
			.ok_or_else(|| project_not_found(key.project))?;
		let desired = !displayed;
		cache.set_pending(key.project, key.kind, desired);

		let mut keys = self.keys.lock();
		let entry = keys.entry(key).or_default();
		entry.generation += 1;
		entry.phase = reduce(entry.phase, MutationAction::Begin);
		self.publish(key, entry.phase, desired);
		Ok((entry.generation, desired, entry.writer.clone()))
	}

	fn is_latest(&self, key: &MutationKey, generation: u64) -> bool {
		self.keys
			.lock()
			.get(key)
			.is_some_and(|entry| entry.generation == generation)
	}

	/// Seed the store truth from the confirmed cache after a snapshot change
	///
	/// Returns `false` when the project is no longer cached.
	fn load_truth(&self, key: &MutationKey, truth: &mut StoreTruth) -> bool {
		let cache = self.cache.read();
		if truth.epoch == Some(cache.epoch()) {
			return true;
		}
		let Some(cached) = cache.confirmed(key.project) else {
			return false;
		};
		let votes_count = cached.project.votes_count;
		*truth = StoreTruth {
			epoch: Some(cache.epoch()),
			active: cached.flag(key.kind),
			votes_count,
			others: votes_count.saturating_sub(u64::from(cached.voted)),
			settled: cached.flag(key.kind),
		};
		true
	}

	/// Bring the store to `desired`, returning the vote count it now holds
	///
	/// The relationship row is written first, then the counter. Either step is skipped when
	/// the store is already known to hold the wanted value, so a retry after a partial
	/// failure only redoes what is missing.
	async fn write(
		&self,
		key: MutationKey,
		desired: bool,
		truth: &mut StoreTruth,
	) -> StoreResult<Option<u64>> {
		if truth.active != desired {
			match (key.kind, desired) {
				(MutationKind::Vote, true) => {
					self.repository
						.insert_vote(&Vote::new(key.user, key.project))
						.await?
				}
				(MutationKind::Vote, false) => {
					self.repository.delete_vote(key.user, key.project).await?
				}
				(MutationKind::Bookmark, true) => {
					self.repository
						.insert_bookmark(&Bookmark::new(key.user, key.project))
						.await?
				}
				(MutationKind::Bookmark, false) => {
					self.repository
						.delete_bookmark(key.user, key.project)
						.await?
				}
			}
			truth.active = desired;
		}

		if key.kind == MutationKind::Bookmark {
			truth.settled = desired;
			return Ok(None);
		}
		let count = truth.others.saturating_add(u64::from(desired));
		if truth.votes_count != count {
			self.repository
				.set_counter(key.project, ProjectCounter::Votes, count)
				.await?;
			truth.votes_count = count;
		}
		truth.settled = desired;
		Ok(Some(count))
	}

	/// Apply the outcome of generation `generation`, unless it was overtaken
	///
	/// A failure rolls back to `settled`, the outcome of the last write sequence that
	/// completed, which may be one of an overtaken request.
	fn finish(
		&self,
		key: MutationKey,
		generation: u64,
		desired: bool,
		settled: Settled,
		result: StoreResult<Option<u64>>,
	) -> Result<ToggleOutcome> {
		let mut cache = self.cache.write();
		let mut keys = self.keys.lock();
		let Some(entry) = keys.get_mut(&key) else {
			return Ok(ToggleOutcome::Superseded);
		};
		if entry.generation != generation {
			tracing::debug!(project = %key.project, kind = %key.kind, generation, "completion ignored, superseded");
			return Ok(ToggleOutcome::Superseded);
		}
		if !self.scope.is_alive() {
			cache.clear_pending(key.project, key.kind);
			entry.phase = reduce(entry.phase, MutationAction::Discard);
			tracing::debug!(project = %key.project, kind = %key.kind, "completion discarded, view torn down");
			return Ok(ToggleOutcome::Discarded);
		}

		match result {
			Ok(votes_count) => {
				let user = key.user;
				cache.commit(key.project, key.kind, desired, votes_count, || {
					Bookmark::new(user, key.project)
				});
				for action in [MutationAction::Succeed, MutationAction::Settle] {
					entry.phase = reduce(entry.phase, action);
					self.publish(key, entry.phase, desired);
				}
				tracing::info!(project = %key.project, kind = %key.kind, active = desired, "toggle committed");
				Ok(ToggleOutcome::Committed { active: desired })
			}
			Err(error) => {
				let user = key.user;
				cache.commit(key.project, key.kind, settled.active, settled.votes_count, || {
					Bookmark::new(user, key.project)
				});
				if is_project_gone(&error) {
					cache.evict(key.project);
				}
				let displayed = cache
					.displayed_flag(key.project, key.kind)
					.unwrap_or(false);
				for action in [MutationAction::Fail, MutationAction::Settle] {
					entry.phase = reduce(entry.phase, action);
					self.publish(key, entry.phase, displayed);
				}
				tracing::warn!(project = %key.project, kind = %key.kind, %error, "toggle rolled back");
				Err(error.into())
			}
		}
	}

	fn discard(&self, key: MutationKey) {
		let mut cache = self.cache.write();
		cache.clear_pending(key.project, key.kind);
		let displayed = cache.displayed_flag(key.project, key.kind).unwrap_or(false);
		let mut keys = self.keys.lock();
		if let Some(entry) = keys.get_mut(&key) {
			entry.phase = reduce(entry.phase, MutationAction::Discard);
			self.publish(key, entry.phase, displayed);
		}
	}

	fn publish(&self, key: MutationKey, phase: MutationPhase, displayed: bool) {
		// No subscribers is fine.
		let _ = self.events.send(MutationEvent {
			key,
			phase,
			displayed,
		});
	}
}

fn project_not_found(project: ProjectId) -> ShowcaseError {
	ShowcaseError::NotFound {
		entity: Entity::Projects.to_string(),
		key: project.to_string(),
	}
}

fn is_project_gone(error: &StoreError) -> bool {
	matches!(
		error,
		StoreError::NotFound {
			entity: Entity::Projects,
			..
		}
	)
}
