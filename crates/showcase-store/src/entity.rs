//! Store entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tables the core reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
	Profiles,
	Projects,
	Votes,
	Comments,
	Bookmarks,
	Tags,
}

impl Entity {
	pub fn table_name(&self) -> &'static str {
		match self {
			Self::Profiles => "profiles",
			Self::Projects => "projects",
			Self::Votes => "votes",
			Self::Comments => "comments",
			Self::Bookmarks => "bookmarks",
			Self::Tags => "tags",
		}
	}

	/// Field sets that must be unique across rows of this entity
	pub fn unique_keys(&self) -> &'static [&'static [&'static str]] {
		match self {
			Self::Profiles => &[&["id"], &["username"]],
			Self::Projects | Self::Comments => &[&["id"]],
			Self::Votes | Self::Bookmarks => &[&["user_id", "project_id"]],
			Self::Tags => &[&["name"]],
		}
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.table_name())
	}
}
