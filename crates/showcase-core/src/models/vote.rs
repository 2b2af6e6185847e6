//! Vote model

use crate::ids::{ProfileId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// "user has upvoted project"
///
/// Unique per (user, project). Rows are inserted and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
	pub user_id: ProfileId,
	pub project_id: ProjectId,
	pub created_at: DateTime<Utc>,
}

impl Vote {
	pub fn new(user_id: ProfileId, project_id: ProjectId) -> Self {
		Self {
			user_id,
			project_id,
			created_at: Utc::now(),
		}
	}
}
