//! Project model

use crate::ids::{ProfileId, ProjectId};
use crate::models::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External links attached to a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
	#[serde(default)]
	pub repository_url: Option<String>,
	#[serde(default)]
	pub demo_url: Option<String>,
}

/// A showcased project
///
/// Counters are denormalized copies maintained by the mutation controller. They are
/// unsigned so a decrement past zero has nowhere to go but the floor.
///
/// `owner` is the joined owner profile. It is resolved once when a row is mapped and is
/// `None` when the query did not include it or the profile no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub owner_id: ProfileId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner: Option<Profile>,
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(flatten)]
	pub links: ProjectLinks,
	#[serde(default)]
	pub votes_count: u64,
	#[serde(default)]
	pub comments_count: u64,
	#[serde(default)]
	pub views_count: u64,
	#[serde(default)]
	pub is_featured: bool,
	#[serde(default = "default_published")]
	pub is_published: bool,
	pub created_at: DateTime<Utc>,
}

fn default_published() -> bool {
	true
}

impl Project {
	/// Create a published project with zeroed counters
	pub fn new(owner_id: ProfileId, title: impl Into<String>) -> Self {
		Self {
			id: ProjectId::new(),
			owner_id,
			owner: None,
			title: title.into(),
			description: String::new(),
			tags: Vec::new(),
			links: ProjectLinks::default(),
			votes_count: 0,
			comments_count: 0,
			views_count: 0,
			is_featured: false,
			is_published: true,
			created_at: Utc::now(),
		}
	}

	/// Username of the joined owner profile, if it was fetched
	pub fn author_username(&self) -> Option<&str> {
		self.owner.as_ref().map(|owner| owner.username.as_str())
	}

	/// Exact tag membership
	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags.iter().any(|t| t == tag)
	}
}
