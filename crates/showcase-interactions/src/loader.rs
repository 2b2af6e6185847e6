//! Working-set loading
//!
//! Each load fetches a fresh snapshot and hands it to the view's cache, which discards
//! pending state for projects the snapshot no longer contains. A load that completes after
//! its view was torn down is dropped.

use crate::cache::SharedCache;
use showcase_core::{ProfileId, Project, ProjectId, Result, SessionContext, ViewScope};
use showcase_store::Repository;
use std::collections::HashSet;
use std::sync::Arc;

/// What a load put into the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
	pub projects: usize,
	/// Pending mutations dropped because their project was not fetched again
	pub discarded: usize,
}

/// Fetches working sets into a view's cache
pub struct ViewLoader {
	session: Arc<SessionContext>,
	repository: Repository,
	cache: SharedCache,
	scope: ViewScope,
}

impl ViewLoader {
	pub fn new(
		session: Arc<SessionContext>,
		repository: Repository,
		cache: SharedCache,
		scope: ViewScope,
	) -> Self {
		Self {
			session,
			repository,
			cache,
			scope,
		}
	}

	/// Published projects, newest first, with the session user's votes and bookmarks
	pub async fn load_discover(&self, limit: Option<usize>) -> Result<LoadSummary> {
		let projects = self.repository.published_projects(limit).await?;
		self.install(projects).await
	}

	/// Projects owned by `owner`, e.g. for a profile or dashboard view
	pub async fn load_owned(&self, owner: ProfileId) -> Result<LoadSummary> {
		let projects = self.repository.projects_by_owner(owner).await?;
		self.install(projects).await
	}

	/// The session user's bookmark list
	pub async fn load_bookmarks(&self) -> Result<LoadSummary> {
		let user = self.session.require_user()?;
		let bookmarks = self.repository.bookmarks(user).await?;
		let ids: Vec<ProjectId> = bookmarks.iter().map(|bookmark| bookmark.project_id).collect();
		let voted = self.repository.voted_project_ids(user, &ids).await?;
		self.scope.ensure_alive()?;

		let discarded = self.cache.write().replace_bookmarks(bookmarks, &voted);
		let projects = self.cache.read().len();
		tracing::info!(%user, projects, discarded, "bookmarks loaded");
		Ok(LoadSummary {
			projects,
			discarded,
		})
	}

	async fn install(&self, projects: Vec<Project>) -> Result<LoadSummary> {
		let ids: Vec<ProjectId> = projects.iter().map(|project| project.id).collect();
		let (voted, bookmarked) = match self.session.require_user() {
			Ok(user) => (
				self.repository.voted_project_ids(user, &ids).await?,
				self.repository.bookmarked_project_ids(user, &ids).await?,
			),
			Err(_) => (HashSet::new(), HashSet::new()),
		};
		self.scope.ensure_alive()?;

		let count = projects.len();
		let discarded = self
			.cache
			.write()
			.replace_snapshot(projects, &voted, &bookmarked);
		tracing::info!(projects = count, discarded, "working set loaded");
		Ok(LoadSummary {
			projects: count,
			discarded,
		})
	}
}
