//! Comment posting and deletion

use crate::cache::SharedCache;
use showcase_core::{
	Comment, CommentId, NewComment, ProjectId, Result, SessionContext, ShowcaseError, ViewScope,
};
use showcase_store::{Entity, ProjectCounter, Repository};
use std::sync::Arc;
use validator::Validate;

/// Comments on behalf of the session user
///
/// Input is validated before any write. `comments_count` on the project is kept in step
/// with each insert and delete; the cached project follows once the store accepted it.
pub struct CommentService {
	session: Arc<SessionContext>,
	repository: Repository,
	cache: SharedCache,
	scope: ViewScope,
}

impl CommentService {
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

	/// Comments on `project`, newest first, with their authors
	pub async fn list_comments(&self, project: ProjectId) -> Result<Vec<Comment>> {
		let comments = self.repository.comments_for_project(project).await?;
		self.scope.ensure_alive()?;
		Ok(comments)
	}

	/// Post a comment as the session user
	///
	/// Succeeds once the comment row is stored. A failed `comments_count` update after that
	/// is logged and left for the next reload, so a retry never duplicates the comment.
	pub async fn post_comment(&self, project: ProjectId, content: impl Into<String>) -> Result<Comment> {
		let session = self.session.current().ok_or(ShowcaseError::Unauthenticated)?;
		self.scope.ensure_alive()?;
		let input = NewComment::new(project, content);
		input.validate()?;

		let current = self.comments_count(project).await?;
		let comment = Comment::new(input.project_id, session.user_id(), input.content);
		let mut stored = self.repository.insert_comment(&comment).await?;
		tracing::info!(%project, comment = %stored.id, "comment posted");
		self.sync_counter(project, current.saturating_add(1)).await;
		stored.author = Some(session.user);
		Ok(stored)
	}

	/// Delete a comment; allowed for its author and for the project owner
	///
	/// As with posting, the counter update after the delete is best effort.
	pub async fn delete_comment(&self, id: CommentId) -> Result<()> {
		let user = self.session.require_user()?;
		self.scope.ensure_alive()?;

		let comment = self
			.repository
			.comment(id)
			.await?
			.ok_or_else(|| not_found(Entity::Comments, id))?;
		let project = self
			.repository
			.project(comment.project_id)
			.await?
			.ok_or_else(|| not_found(Entity::Projects, comment.project_id))?;
		if comment.author_id != user && project.owner_id != user {
			return Err(ShowcaseError::PermissionDenied(
				"only the author or the project owner may delete a comment".to_string(),
			));
		}

		self.repository.delete_comment(id).await?;
		tracing::info!(project = %project.id, comment = %id, "comment deleted");
		self.sync_counter(project.id, project.comments_count.saturating_sub(1))
			.await;
		Ok(())
	}

	async fn sync_counter(&self, project: ProjectId, count: u64) {
		match self
			.repository
			.set_counter(project, ProjectCounter::Comments, count)
			.await
		{
			Ok(()) => {
				if self.scope.is_alive() {
					self.cache.write().set_comments(project, count);
				}
			}
			Err(error) => {
				tracing::warn!(%project, count, %error, "comment count not updated");
			}
		}
	}

	async fn comments_count(&self, project: ProjectId) -> Result<u64> {
		let cached = self
			.cache
			.read()
			.confirmed(project)
			.map(|cached| cached.project.comments_count);
		if let Some(count) = cached {
			return Ok(count);
		}
		self.repository
			.project(project)
			.await?
			.map(|project| project.comments_count)
			.ok_or_else(|| not_found(Entity::Projects, project))
	}
}

fn not_found(entity: Entity, key: impl ToString) -> ShowcaseError {
	ShowcaseError::NotFound {
		entity: entity.to_string(),
		key: key.to_string(),
	}
}
