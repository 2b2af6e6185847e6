//! Model factories
//!
//! Builders return plain model values; nothing is written to a store until the caller
//! seeds it.

use chrono::{DateTime, Duration, Utc};
use showcase_core::{Profile, ProfileId, Project};

/// Builder for [`Profile`] values
#[derive(Debug, Clone)]
pub struct ProfileFactory {
	profile: Profile,
}

impl ProfileFactory {
	pub fn new(username: impl Into<String>) -> Self {
		Self {
			profile: Profile::new(username),
		}
	}

	pub fn display_name(mut self, name: impl Into<String>) -> Self {
		self.profile.display_name = Some(name.into());
		self
	}

	pub fn avatar_url(mut self, url: impl Into<String>) -> Self {
		self.profile.avatar_url = Some(url.into());
		self
	}

	pub fn build(self) -> Profile {
		self.profile
	}
}

/// Builder for [`Project`] values
///
/// # Examples
///
/// ```
/// use showcase_test::{ProfileFactory, ProjectFactory};
///
/// let owner = ProfileFactory::new("ada").build();
/// let project = ProjectFactory::owned_by(&owner)
/// 	.title("Compiler")
/// 	.tags(["rust", "parsing"])
/// 	.votes(12)
/// 	.build();
///
/// assert_eq!(project.owner_id, owner.id);
/// assert_eq!(project.votes_count, 12);
/// ```
#[derive(Debug, Clone)]
pub struct ProjectFactory {
	project: Project,
}

impl ProjectFactory {
	/// Project owned by `owner`, with the owner profile joined
	pub fn owned_by(owner: &Profile) -> Self {
		let mut project = Project::new(owner.id, "Untitled project");
		project.owner = Some(owner.clone());
		Self { project }
	}

	/// Project whose owner profile was not joined
	pub fn orphan(owner_id: ProfileId) -> Self {
		Self {
			project: Project::new(owner_id, "Untitled project"),
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.project.title = title.into();
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.project.description = description.into();
		self
	}

	pub fn tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.project.tags = tags.into_iter().map(Into::into).collect();
		self
	}

	pub fn votes(mut self, count: u64) -> Self {
		self.project.votes_count = count;
		self
	}

	pub fn comments(mut self, count: u64) -> Self {
		self.project.comments_count = count;
		self
	}

	pub fn views(mut self, count: u64) -> Self {
		self.project.views_count = count;
		self
	}

	pub fn featured(mut self) -> Self {
		self.project.is_featured = true;
		self
	}

	pub fn unpublished(mut self) -> Self {
		self.project.is_published = false;
		self
	}

	pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
		self.project.created_at = at;
		self
	}

	/// Creation time `days` before `now`
	pub fn days_old(self, now: DateTime<Utc>, days: i64) -> Self {
		self.created_at(now - Duration::days(days))
	}

	pub fn build(self) -> Project {
		self.project
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_orphan_has_no_owner() {
		let project = ProjectFactory::orphan(ProfileId::new()).build();
		assert!(project.owner.is_none());
		assert_eq!(project.author_username(), None);
	}

	#[test]
	fn test_days_old() {
		let now = Utc::now();
		let project = ProjectFactory::orphan(ProfileId::new())
			.days_old(now, 3)
			.build();
		assert_eq!(now - project.created_at, Duration::days(3));
	}
}
