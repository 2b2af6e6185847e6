//! Shared helpers for interaction tests

#![allow(dead_code)]

use showcase_core::{Project, ProjectId, SessionContext};
use showcase_interactions::MountedView;
use showcase_store::{Entity, InMemoryStore, RemoteStore, Repository, fields};
use showcase_test::SeededWorld;
use std::sync::Arc;

/// Mount a view for `session` over `store` and load the discover working set
pub async fn mount_loaded(session: Arc<SessionContext>, store: Arc<dyn RemoteStore>) -> MountedView {
	let view = MountedView::mount(session, store);
	view.loader.load_discover(None).await.unwrap();
	view
}

/// Viewer's discover view over the world's store
pub async fn viewer_view(world: &SeededWorld) -> MountedView {
	mount_loaded(world.viewer_session(), world.store.clone()).await
}

/// Displayed `(votes_count, voted)` for a project
pub fn shown_vote(view: &MountedView, project: ProjectId) -> (u64, bool) {
	let shown = view.cache.read().displayed(project).unwrap();
	(shown.project.votes_count, shown.voted)
}

/// Confirmed `votes_count` for a project
pub fn confirmed_votes(view: &MountedView, project: ProjectId) -> u64 {
	view.cache
		.read()
		.confirmed(project)
		.unwrap()
		.project
		.votes_count
}

/// Project row as stored
pub async fn stored_project(store: &Arc<InMemoryStore>, project: ProjectId) -> Project {
	Repository::new(store.clone())
		.project(project)
		.await
		.unwrap()
		.unwrap()
}

/// Counter value stored on the project row
pub async fn stored_votes(store: &Arc<InMemoryStore>, project: ProjectId) -> u64 {
	stored_project(store, project).await.votes_count
}

/// Number of rows of `entity` for the (user, project) pair
pub fn pair_rows(
	store: &InMemoryStore,
	entity: Entity,
	user: impl ToString,
	project: ProjectId,
) -> usize {
	store.count_matching(
		entity,
		&fields([
			("user_id", user.to_string()),
			("project_id", project.to_string()),
		]),
	)
}
