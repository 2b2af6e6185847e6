//! Bookmark model

use crate::ids::{ProfileId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// "user has saved project", unique per (user, project)
///
/// Unlike [`Vote`](crate::Vote) there is no counter on the project side. `project` is the
/// joined project row used by the bookmarks view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
	pub user_id: ProfileId,
	pub project_id: ProjectId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project: Option<crate::Project>,
	pub created_at: DateTime<Utc>,
}

impl Bookmark {
	pub fn new(user_id: ProfileId, project_id: ProjectId) -> Self {
		Self {
			user_id,
			project_id,
			project: None,
			created_at: Utc::now(),
		}
	}
}
