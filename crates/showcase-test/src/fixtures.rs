//! Common rstest fixtures
//!
//! [`world`] seeds a small catalogue: an author with three published projects, and a
//! separate viewer who interacts with them.

use crate::factory::{ProfileFactory, ProjectFactory};
use chrono::Utc;
use rstest::*;
use showcase_core::{Profile, Project, SessionContext};
use showcase_store::{Entity, InMemoryStore, StoreResult};
use std::sync::Arc;

/// A seeded store plus the actors used by most tests
pub struct SeededWorld {
	pub store: Arc<InMemoryStore>,
	/// Owner of every seeded project
	pub author: Profile,
	/// User interacting with the author's projects
	pub viewer: Profile,
	/// Seeded projects, newest first
	pub projects: Vec<Project>,
}

impl SeededWorld {
	/// Session logged in as the viewer
	pub fn viewer_session(&self) -> Arc<SessionContext> {
		Arc::new(SessionContext::authenticated(self.viewer.clone()))
	}

	/// Session logged in as the author
	pub fn author_session(&self) -> Arc<SessionContext> {
		Arc::new(SessionContext::authenticated(self.author.clone()))
	}

	pub fn project(&self, index: usize) -> &Project {
		&self.projects[index]
	}

	/// Store the given projects next to the seeded ones
	pub fn add_projects(&mut self, projects: Vec<Project>) -> StoreResult<()> {
		seed_projects(&self.store, &projects)?;
		self.projects.extend(projects);
		self.projects
			.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(())
	}
}

/// Write projects as store rows
///
/// The joined owner is not part of a project row; it is stripped before seeding.
pub fn seed_projects(store: &InMemoryStore, projects: &[Project]) -> StoreResult<()> {
	let rows: Vec<Project> = projects
		.iter()
		.cloned()
		.map(|mut project| {
			project.owner = None;
			project
		})
		.collect();
	store.seed(Entity::Projects, &rows)
}

/// Empty in-memory store
#[fixture]
pub fn store() -> Arc<InMemoryStore> {
	Arc::new(InMemoryStore::new())
}

/// Author, viewer and three published projects with 0, 5 and 12 votes
#[fixture]
pub fn world() -> SeededWorld {
	let store = Arc::new(InMemoryStore::new());
	let author = ProfileFactory::new("ada").display_name("Ada").build();
	let viewer = ProfileFactory::new("grace").build();
	let now = Utc::now();

	let projects = vec![
		ProjectFactory::owned_by(&author)
			.title("Compiler")
			.tags(["rust", "parsing"])
			.days_old(now, 1)
			.build(),
		ProjectFactory::owned_by(&author)
			.title("Chat server")
			.tags(["rust", "networking"])
			.votes(5)
			.comments(2)
			.days_old(now, 3)
			.build(),
		ProjectFactory::owned_by(&author)
			.title("Static site")
			.tags(["web"])
			.votes(12)
			.featured()
			.days_old(now, 20)
			.build(),
	];

	store
		.seed(Entity::Profiles, &[author.clone(), viewer.clone()])
		.expect("seed profiles");
	seed_projects(&store, &projects).expect("seed projects");

	SeededWorld {
		store,
		author,
		viewer,
		projects,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[rstest]
	fn test_world_rows(world: SeededWorld) {
		assert_eq!(world.store.rows(Entity::Projects).len(), 3);
		assert_eq!(world.store.rows(Entity::Profiles).len(), 2);
		assert!(world.store.rows(Entity::Projects)[0].get("owner").is_none());
		assert!(world.project(0).owner.is_some());
	}
}
