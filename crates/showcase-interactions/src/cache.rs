//! Local entity cache
//!
//! Per-view holding of the most recently fetched projects. Two layers are kept apart:
//!
//! - the **confirmed** layer: the fetched snapshot plus every committed mutation. Feed and
//!   metrics aggregation read only this layer.
//! - the **pending** overlay: relationship flags flipped by in-flight toggles. The
//!   displayed view is the confirmed layer with the overlay applied.
//!
//! A rollback is therefore just dropping an overlay entry.

use crate::state::MutationKind;
use indexmap::IndexMap;
use parking_lot::RwLock;
use showcase_core::{Bookmark, Project, ProjectId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Cache shared between a view and its controller and loader
pub type SharedCache = Arc<RwLock<EntityCache>>;

/// A fetched project with the session user's confirmed relationships
#[derive(Debug, Clone, PartialEq)]
pub struct CachedProject {
	pub project: Project,
	pub voted: bool,
	pub bookmarked: bool,
}

impl CachedProject {
	pub fn flag(&self, kind: MutationKind) -> bool {
		match kind {
			MutationKind::Vote => self.voted,
			MutationKind::Bookmark => self.bookmarked,
		}
	}

	fn set_flag(&mut self, kind: MutationKind, value: bool) {
		match kind {
			MutationKind::Vote => self.voted = value,
			MutationKind::Bookmark => self.bookmarked = value,
		}
	}
}

/// What the user sees for one project
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedProject {
	/// Project with `votes_count` adjusted for a pending vote toggle
	pub project: Project,
	pub voted: bool,
	pub bookmarked: bool,
	/// Whether any toggle on this project is in flight
	pub pending: bool,
}

/// Vote count after moving the relationship from `from` to `to`, floored at 0
pub fn adjusted_count(count: u64, from: bool, to: bool) -> u64 {
	match (from, to) {
		(false, true) => count.saturating_add(1),
		(true, false) => count.saturating_sub(1),
		_ => count,
	}
}

#[derive(Debug, Default)]
pub struct EntityCache {
	projects: IndexMap<ProjectId, CachedProject>,
	bookmarks: Vec<Bookmark>,
	pending: HashMap<(ProjectId, MutationKind), bool>,
	epoch: u64,
}

impl EntityCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn shared() -> SharedCache {
		Arc::new(RwLock::new(Self::new()))
	}

	/// Replace the working set with a freshly fetched snapshot
	///
	/// Server values win for every fetched project. Pending state for projects that are no
	/// longer fetched is discarded; the number of discarded entries is returned.
	pub fn replace_snapshot(
		&mut self,
		projects: Vec<Project>,
		voted: &HashSet<ProjectId>,
		bookmarked: &HashSet<ProjectId>,
	) -> usize {
		self.projects = projects
			.into_iter()
			.map(|project| {
				let id = project.id;
				let cached = CachedProject {
					voted: voted.contains(&id),
					bookmarked: bookmarked.contains(&id),
					project,
				};
				(id, cached)
			})
			.collect();
		self.bookmarks
			.retain(|bookmark| self.projects.contains_key(&bookmark.project_id));
		let before = self.pending.len();
		let projects = &self.projects;
		self.pending.retain(|(id, _), _| projects.contains_key(id));
		self.epoch += 1;
		before - self.pending.len()
	}

	/// Replace the held bookmark list
	///
	/// Bookmarked projects joined onto the rows join the working set as bookmarked.
	pub fn replace_bookmarks(&mut self, bookmarks: Vec<Bookmark>, voted: &HashSet<ProjectId>) -> usize {
		let projects: Vec<Project> = bookmarks
			.iter()
			.filter_map(|bookmark| bookmark.project.clone())
			.collect();
		let bookmarked: HashSet<ProjectId> = projects.iter().map(|project| project.id).collect();
		let discarded = self.replace_snapshot(projects, voted, &bookmarked);
		self.bookmarks = bookmarks
			.into_iter()
			.filter(|bookmark| bookmarked.contains(&bookmark.project_id))
			.collect();
		discarded
	}

	/// Incremented by every snapshot replacement
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	pub fn len(&self) -> usize {
		self.projects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.projects.is_empty()
	}

	pub fn contains(&self, id: ProjectId) -> bool {
		self.projects.contains_key(&id)
	}

	pub fn confirmed(&self, id: ProjectId) -> Option<&CachedProject> {
		self.projects.get(&id)
	}

	/// Confirmed projects in snapshot order, for aggregation
	pub fn confirmed_projects(&self) -> Vec<&Project> {
		self.projects.values().map(|cached| &cached.project).collect()
	}

	/// Relationship state shown to the user
	pub fn displayed_flag(&self, id: ProjectId, kind: MutationKind) -> Option<bool> {
		let cached = self.projects.get(&id)?;
		Some(
			self.pending
				.get(&(id, kind))
				.copied()
				.unwrap_or_else(|| cached.flag(kind)),
		)
	}

	pub fn displayed(&self, id: ProjectId) -> Option<DisplayedProject> {
		self.projects.get(&id).map(|cached| self.display(cached))
	}

	/// Displayed projects in snapshot order
	pub fn displayed_projects(&self) -> Vec<DisplayedProject> {
		self.projects
			.values()
			.map(|cached| self.display(cached))
			.collect()
	}

	fn display(&self, cached: &CachedProject) -> DisplayedProject {
		let id = cached.project.id;
		let vote = self.pending.get(&(id, MutationKind::Vote)).copied();
		let bookmark = self.pending.get(&(id, MutationKind::Bookmark)).copied();
		let voted = vote.unwrap_or(cached.voted);

		let mut project = cached.project.clone();
		project.votes_count = adjusted_count(project.votes_count, cached.voted, voted);

		DisplayedProject {
			project,
			voted,
			bookmarked: bookmark.unwrap_or(cached.bookmarked),
			pending: vote.is_some() || bookmark.is_some(),
		}
	}

	/// Bookmarks whose project is displayed as bookmarked, in list order
	pub fn bookmarks(&self) -> Vec<&Bookmark> {
		self.bookmarks
			.iter()
			.filter(|bookmark| {
				self.displayed_flag(bookmark.project_id, MutationKind::Bookmark)
					.unwrap_or(false)
			})
			.collect()
	}

	pub fn is_pending(&self, id: ProjectId, kind: MutationKind) -> bool {
		self.pending.contains_key(&(id, kind))
	}

	/// Overlay the displayed relationship; returns `false` when the project is not cached
	pub(crate) fn set_pending(&mut self, id: ProjectId, kind: MutationKind, desired: bool) -> bool {
		if !self.projects.contains_key(&id) {
			return false;
		}
		self.pending.insert((id, kind), desired);
		true
	}

	/// Drop the overlay, reverting the displayed state to the confirmed one
	pub(crate) fn clear_pending(&mut self, id: ProjectId, kind: MutationKind) {
		self.pending.remove(&(id, kind));
	}

	/// Make `active` the confirmed relationship and clear the overlay
	///
	/// A confirmed bookmark removal drops the entry from the held list.
	pub(crate) fn commit(
		&mut self,
		id: ProjectId,
		kind: MutationKind,
		active: bool,
		votes_count: Option<u64>,
		bookmark: impl FnOnce() -> Bookmark,
	) {
		self.pending.remove(&(id, kind));
		let Some(cached) = self.projects.get_mut(&id) else {
			return;
		};
		cached.set_flag(kind, active);
		if let Some(count) = votes_count {
			cached.project.votes_count = count;
		}
		if kind == MutationKind::Bookmark {
			if active {
				if !self.bookmarks.iter().any(|b| b.project_id == id) {
					let mut entry = bookmark();
					entry.project = Some(cached.project.clone());
					self.bookmarks.insert(0, entry);
				}
			} else {
				self.bookmarks.retain(|b| b.project_id != id);
			}
		}
	}

	pub(crate) fn set_views(&mut self, id: ProjectId, views: u64) {
		if let Some(cached) = self.projects.get_mut(&id) {
			cached.project.views_count = views;
		}
	}

	pub(crate) fn set_comments(&mut self, id: ProjectId, comments: u64) {
		if let Some(cached) = self.projects.get_mut(&id) {
			cached.project.comments_count = comments;
		}
	}

	/// Remove a project that vanished from the store
	pub fn evict(&mut self, id: ProjectId) -> Option<CachedProject> {
		self.pending.retain(|(pending, _), _| *pending != id);
		self.bookmarks.retain(|bookmark| bookmark.project_id != id);
		self.projects.shift_remove(&id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use showcase_core::ProfileId;

	fn project(votes: u64) -> Project {
		let mut project = Project::new(ProfileId::new(), "p");
		project.votes_count = votes;
		project
	}

	fn cache_with(projects: Vec<Project>, voted: &[ProjectId]) -> EntityCache {
		let mut cache = EntityCache::new();
		cache.replace_snapshot(projects, &voted.iter().copied().collect(), &HashSet::new());
		cache
	}

	#[test]
	fn test_pending_vote_adjusts_displayed_count_only() {
		let p = project(10);
		let id = p.id;
		let mut cache = cache_with(vec![p], &[]);

		cache.set_pending(id, MutationKind::Vote, true);

		let shown = cache.displayed(id).unwrap();
		assert!(shown.voted);
		assert!(shown.pending);
		assert_eq!(shown.project.votes_count, 11);
		assert_eq!(cache.confirmed_projects()[0].votes_count, 10);
	}

	#[test]
	fn test_unvote_floors_at_zero() {
		let p = project(0);
		let id = p.id;
		let mut cache = cache_with(vec![p], &[id]);

		cache.set_pending(id, MutationKind::Vote, false);

		assert_eq!(cache.displayed(id).unwrap().project.votes_count, 0);
	}

	#[test]
	fn test_clear_pending_reverts() {
		let p = project(3);
		let id = p.id;
		let mut cache = cache_with(vec![p], &[]);
		cache.set_pending(id, MutationKind::Vote, true);

		cache.clear_pending(id, MutationKind::Vote);

		let shown = cache.displayed(id).unwrap();
		assert!(!shown.voted);
		assert_eq!(shown.project.votes_count, 3);
	}

	#[test]
	fn test_snapshot_discards_pending_for_missing_projects() {
		let kept = project(1);
		let gone = project(2);
		let (kept_id, gone_id) = (kept.id, gone.id);
		let mut cache = cache_with(vec![kept.clone(), gone], &[]);
		cache.set_pending(kept_id, MutationKind::Vote, true);
		cache.set_pending(gone_id, MutationKind::Bookmark, true);
		let epoch = cache.epoch();

		let discarded = cache.replace_snapshot(vec![kept], &HashSet::new(), &HashSet::new());

		assert_eq!(discarded, 1);
		assert!(cache.is_pending(kept_id, MutationKind::Vote));
		assert!(!cache.contains(gone_id));
		assert_eq!(cache.epoch(), epoch + 1);
	}

	#[test]
	fn test_set_pending_on_unknown_project() {
		let mut cache = EntityCache::new();
		assert!(!cache.set_pending(ProjectId::new(), MutationKind::Vote, true));
	}

	#[test]
	fn test_evict_removes_everything_about_project() {
		let p = project(1);
		let id = p.id;
		let user = ProfileId::new();
		let mut bookmark = Bookmark::new(user, id);
		bookmark.project = Some(p.clone());
		let mut cache = EntityCache::new();
		cache.replace_bookmarks(vec![bookmark], &HashSet::new());
		cache.set_pending(id, MutationKind::Vote, true);

		assert!(cache.evict(id).is_some());

		assert!(cache.is_empty());
		assert!(cache.bookmarks().is_empty());
		assert!(!cache.is_pending(id, MutationKind::Vote));
	}

	#[test]
	fn test_bookmark_without_joined_project_is_dropped() {
		let user = ProfileId::new();
		let mut cache = EntityCache::new();

		cache.replace_bookmarks(vec![Bookmark::new(user, ProjectId::new())], &HashSet::new());

		assert!(cache.bookmarks().is_empty());
	}
}
