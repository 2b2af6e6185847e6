//! Comment model

use crate::ids::{CommentId, ProfileId, ProjectId};
use crate::models::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a project
///
/// Append-only from the core's point of view. Removal is allowed for the author and for
/// the owner of the commented project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
	pub id: CommentId,
	pub project_id: ProjectId,
	pub author_id: ProfileId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub author: Option<Profile>,
	pub content: String,
	pub created_at: DateTime<Utc>,
	#[serde(default)]
	pub likes_count: u64,
}

impl Comment {
	pub fn new(project_id: ProjectId, author_id: ProfileId, content: impl Into<String>) -> Self {
		Self {
			id: CommentId::new(),
			project_id,
			author_id,
			author: None,
			content: content.into(),
			created_at: Utc::now(),
			likes_count: 0,
		}
	}
}
