//! Typed repository
//!
//! The mapping boundary between untyped store rows and the core's models. Joined rows are
//! requested with [`Include`] and land in the models' `Option<_>` relation fields here,
//! so nothing downstream re-checks the shape of a row.

use crate::entity::Entity;
use crate::error::StoreResult;
use crate::query::{Include, Query};
use crate::record::{Record, fields, from_record, from_records, to_record};
use crate::store::RemoteStore;
use serde_json::Value;
use showcase_core::{Bookmark, Comment, CommentId, ProfileId, Project, ProjectId, Vote};
use std::collections::HashSet;
use std::sync::Arc;

/// Denormalized counters on a project row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectCounter {
	Votes,
	Comments,
	Views,
}

impl ProjectCounter {
	pub fn field(&self) -> &'static str {
		match self {
			Self::Votes => "votes_count",
			Self::Comments => "comments_count",
			Self::Views => "views_count",
		}
	}
}

/// Typed access to the remote store
#[derive(Clone)]
pub struct Repository {
	store: Arc<dyn RemoteStore>,
}

impl Repository {
	pub fn new(store: Arc<dyn RemoteStore>) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &Arc<dyn RemoteStore> {
		&self.store
	}

	fn owner_include() -> Include {
		Include::new("owner", Entity::Profiles, "owner_id", "id")
	}

	/// Published projects, newest first, with their owner profile
	pub async fn published_projects(&self, limit: Option<usize>) -> StoreResult<Vec<Project>> {
		let mut query = Query::new(Entity::Projects)
			.eq("is_published", true)
			.order_desc("created_at")
			.include(Self::owner_include());
		if let Some(limit) = limit {
			query = query.limit(limit);
		}
		from_records(self.store.select(&query).await?)
	}

	/// Every project owned by `owner`, newest first
	pub async fn projects_by_owner(&self, owner: ProfileId) -> StoreResult<Vec<Project>> {
		let query = Query::new(Entity::Projects)
			.eq("owner_id", id_value(owner))
			.order_desc("created_at")
			.include(Self::owner_include());
		from_records(self.store.select(&query).await?)
	}

	pub async fn project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
		let query = Query::new(Entity::Projects)
			.eq("id", id_value(id))
			.include(Self::owner_include())
			.limit(1);
		first(self.store.select(&query).await?)
	}

	/// Which of `projects` the user has voted for
	pub async fn voted_project_ids(
		&self,
		user: ProfileId,
		projects: &[ProjectId],
	) -> StoreResult<HashSet<ProjectId>> {
		self.related_project_ids(Entity::Votes, user, projects).await
	}

	/// Which of `projects` the user has bookmarked
	pub async fn bookmarked_project_ids(
		&self,
		user: ProfileId,
		projects: &[ProjectId],
	) -> StoreResult<HashSet<ProjectId>> {
		self.related_project_ids(Entity::Bookmarks, user, projects).await
	}

	async fn related_project_ids(
		&self,
		entity: Entity,
		user: ProfileId,
		projects: &[ProjectId],
	) -> StoreResult<HashSet<ProjectId>> {
		if projects.is_empty() {
			return Ok(HashSet::new());
		}
		let query = Query::new(entity)
			.eq("user_id", id_value(user))
			.in_list("project_id", projects.iter().map(|id| id_value(*id)));
		let rows = self.store.select(&query).await?;
		rows.into_iter()
			.map(|row| {
				let value = row.get("project_id").cloned().unwrap_or(Value::Null);
				Ok(serde_json::from_value::<ProjectId>(value)?)
			})
			.collect()
	}

	/// The user's bookmarks, newest first, each with its project
	pub async fn bookmarks(&self, user: ProfileId) -> StoreResult<Vec<Bookmark>> {
		let query = Query::new(Entity::Bookmarks)
			.eq("user_id", id_value(user))
			.order_desc("created_at")
			.include(Include::new("project", Entity::Projects, "project_id", "id"));
		from_records(self.store.select(&query).await?)
	}

	/// Vote records authored by the user
	pub async fn votes_by_user(&self, user: ProfileId) -> StoreResult<Vec<Vote>> {
		let query = Query::new(Entity::Votes)
			.eq("user_id", id_value(user))
			.order_desc("created_at");
		from_records(self.store.select(&query).await?)
	}

	/// Comment records authored by the user
	pub async fn comments_by_user(&self, user: ProfileId) -> StoreResult<Vec<Comment>> {
		let query = Query::new(Entity::Comments)
			.eq("author_id", id_value(user))
			.order_desc("created_at");
		from_records(self.store.select(&query).await?)
	}

	/// Comments on a project, newest first, with their author
	pub async fn comments_for_project(&self, project: ProjectId) -> StoreResult<Vec<Comment>> {
		let query = Query::new(Entity::Comments)
			.eq("project_id", id_value(project))
			.order_desc("created_at")
			.include(Include::new("author", Entity::Profiles, "author_id", "id"));
		from_records(self.store.select(&query).await?)
	}

	pub async fn comment(&self, id: CommentId) -> StoreResult<Option<Comment>> {
		let query = Query::new(Entity::Comments).eq("id", id_value(id)).limit(1);
		first(self.store.select(&query).await?)
	}

	/// Number of vote rows referencing `project`
	pub async fn count_votes(&self, project: ProjectId) -> StoreResult<u64> {
		self.store
			.count(&Query::new(Entity::Votes).eq("project_id", id_value(project)))
			.await
	}

	pub async fn insert_vote(&self, vote: &Vote) -> StoreResult<()> {
		self.store.insert(Entity::Votes, to_record(vote)?).await?;
		Ok(())
	}

	pub async fn delete_vote(&self, user: ProfileId, project: ProjectId) -> StoreResult<()> {
		self.store
			.delete(Entity::Votes, &pair(user, project))
			.await?;
		Ok(())
	}

	pub async fn insert_bookmark(&self, bookmark: &Bookmark) -> StoreResult<()> {
		let mut record = to_record(bookmark)?;
		record.remove("project");
		self.store.insert(Entity::Bookmarks, record).await?;
		Ok(())
	}

	pub async fn delete_bookmark(&self, user: ProfileId, project: ProjectId) -> StoreResult<()> {
		self.store
			.delete(Entity::Bookmarks, &pair(user, project))
			.await?;
		Ok(())
	}

	/// Overwrite one counter on a project row
	pub async fn set_counter(
		&self,
		project: ProjectId,
		counter: ProjectCounter,
		value: u64,
	) -> StoreResult<()> {
		self.store
			.update(
				Entity::Projects,
				&fields([("id", id_value(project))]),
				fields([(counter.field(), Value::from(value))]),
			)
			.await?;
		Ok(())
	}

	pub async fn insert_comment(&self, comment: &Comment) -> StoreResult<Comment> {
		let mut record = to_record(comment)?;
		record.remove("author");
		from_record(self.store.insert(Entity::Comments, record).await?)
	}

	pub async fn delete_comment(&self, id: CommentId) -> StoreResult<()> {
		self.store
			.delete(Entity::Comments, &fields([("id", id_value(id))]))
			.await?;
		Ok(())
	}
}

fn id_value<T: std::fmt::Display>(id: T) -> Value {
	Value::String(id.to_string())
}

fn pair(user: ProfileId, project: ProjectId) -> Record {
	fields([("user_id", id_value(user)), ("project_id", id_value(project))])
}

fn first<T: serde::de::DeserializeOwned>(rows: Vec<Record>) -> StoreResult<Option<T>> {
	rows.into_iter().next().map(from_record).transpose()
}
