//! Metrics loading
//!
//! A failed fetch never aborts the dashboard: the part is replaced by an empty set, logged
//! and reported in [`MetricsInput::degraded`].

use serde::Serialize;
use showcase_core::{Comment, ProfileId, Project, Result, ViewScope, Vote};
use showcase_store::{Repository, StoreResult};
use std::fmt;

/// The three fetches behind a metrics view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSource {
	OwnedProjects,
	Votes,
	Comments,
}

impl fmt::Display for MetricsSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::OwnedProjects => write!(f, "owned projects"),
			Self::Votes => write!(f, "votes"),
			Self::Comments => write!(f, "comments"),
		}
	}
}

/// Raw records for one user's metrics
#[derive(Debug, Clone, Default)]
pub struct MetricsInput {
	pub projects: Vec<Project>,
	pub votes: Vec<Vote>,
	pub comments: Vec<Comment>,
	/// Parts that failed to load and are empty
	pub degraded: Vec<MetricsSource>,
}

impl MetricsInput {
	pub fn is_complete(&self) -> bool {
		self.degraded.is_empty()
	}
}

/// Fetches the records a metrics view needs
pub struct MetricsLoader {
	repository: Repository,
}

impl MetricsLoader {
	pub fn new(repository: Repository) -> Self {
		Self { repository }
	}

	/// Fetch `user`'s projects, votes and comments concurrently
	///
	/// Only a torn-down `scope` is an error.
	pub async fn load(&self, user: ProfileId, scope: &ViewScope) -> Result<MetricsInput> {
		let (projects, votes, comments) = tokio::join!(
			self.repository.projects_by_owner(user),
			self.repository.votes_by_user(user),
			self.repository.comments_by_user(user),
		);
		scope.ensure_alive()?;

		let mut degraded = Vec::new();
		let input = MetricsInput {
			projects: degrade(projects, MetricsSource::OwnedProjects, &mut degraded),
			votes: degrade(votes, MetricsSource::Votes, &mut degraded),
			comments: degrade(comments, MetricsSource::Comments, &mut degraded),
			degraded,
		};
		tracing::debug!(
			%user,
			projects = input.projects.len(),
			votes = input.votes.len(),
			comments = input.comments.len(),
			"metrics input loaded"
		);
		Ok(input)
	}
}

fn degrade<T>(result: StoreResult<Vec<T>>, source: MetricsSource, degraded: &mut Vec<MetricsSource>) -> Vec<T> {
	result.unwrap_or_else(|error| {
		tracing::warn!(%source, %error, "metrics fetch failed, using empty set");
		degraded.push(source);
		Vec::new()
	})
}
