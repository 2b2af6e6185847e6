//! Profile model

use crate::ids::ProfileId;
use serde::{Deserialize, Serialize};

/// Identity record of a user
///
/// Owned and mutated only by its user. `username` is unique across the store and is
/// what the feed search matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	pub id: ProfileId,
	pub username: String,
	#[serde(default)]
	pub display_name: Option<String>,
	#[serde(default)]
	pub avatar_url: Option<String>,
	#[serde(default)]
	pub bio: Option<String>,
}

impl Profile {
	/// Create a profile with a fresh id and only a username set
	pub fn new(username: impl Into<String>) -> Self {
		Self {
			id: ProfileId::new(),
			username: username.into(),
			display_name: None,
			avatar_url: None,
			bio: None,
		}
	}

	/// Name to render: the display name when present, otherwise the username
	pub fn shown_name(&self) -> &str {
		self.display_name
			.as_deref()
			.filter(|name| !name.trim().is_empty())
			.unwrap_or(&self.username)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_shown_name_prefers_display_name() {
		let mut profile = Profile::new("ada");
		assert_eq!(profile.shown_name(), "ada");

		profile.display_name = Some("Ada Lovelace".to_string());
		assert_eq!(profile.shown_name(), "Ada Lovelace");

		profile.display_name = Some("   ".to_string());
		assert_eq!(profile.shown_name(), "ada");
	}
}
