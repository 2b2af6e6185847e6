//! Metrics rollup
//!
//! Two notions of "interactions" are reported side by side and never merged:
//! `total_interactions` counts the vote and comment records the user *made*, while
//! `interactions_received` sums the votes and comments on the user's own projects.

use crate::trend::{TrendPoint, interaction_trend};
use chrono::{DateTime, Utc};
use serde::Serialize;
use showcase_conf::MetricsSettings;
use showcase_core::{Comment, Project, Vote};
use showcase_feed::{TagCount, tag_frequencies};

/// Limits applied to the derived lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsPolicy {
	pub top_projects_limit: usize,
	pub top_tags_limit: usize,
	pub recent_activity_limit: usize,
	pub trend_window_days: usize,
}

impl Default for MetricsPolicy {
	fn default() -> Self {
		Self::from(&MetricsSettings::default())
	}
}

impl From<&MetricsSettings> for MetricsPolicy {
	fn from(settings: &MetricsSettings) -> Self {
		Self {
			top_projects_limit: settings.top_projects_limit,
			top_tags_limit: settings.top_tags_limit,
			recent_activity_limit: settings.recent_activity_limit,
			trend_window_days: settings.trend_window_days,
		}
	}
}

/// Aggregate numbers for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserMetrics {
	pub total_views: u64,
	pub total_votes: u64,
	pub total_comments: u64,
	/// Vote and comment records authored by the user
	pub total_interactions: u64,
	/// `total_votes + total_comments`
	pub interactions_received: u64,
	/// Percentage; see [`engagement_rate`]
	pub engagement_rate: f64,
	pub project_count: usize,
	/// No data source exists yet; always `None`
	pub completion_rate: Option<f64>,
	/// Seconds; no data source exists yet, always `None`
	pub average_time_on_page: Option<f64>,
}

/// Position in the top-projects ranking, starting at 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProject<'a> {
	pub rank: usize,
	pub project: &'a Project,
}

/// Everything a dashboard shows for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport<'a> {
	pub metrics: UserMetrics,
	pub top_projects: Vec<RankedProject<'a>>,
	pub tag_usage: Vec<TagCount>,
	pub recent_activity: Vec<&'a Project>,
	/// Daily interactions made by the user, oldest day first
	pub trend: Vec<TrendPoint>,
}

/// `(votes + comments) / max(views, 1) * 100`
pub fn engagement_rate(votes: u64, comments: u64, views: u64) -> f64 {
	votes.saturating_add(comments) as f64 / views.max(1) as f64 * 100.0
}

fn saturating_sum(counts: impl Iterator<Item = u64>) -> u64 {
	counts.fold(0, u64::saturating_add)
}

/// Presentation form of an engagement rate, one decimal
///
/// ```
/// assert_eq!(showcase_metrics::format_engagement_rate(25.714), "25.7%");
/// ```
pub fn format_engagement_rate(rate: f64) -> String {
	format!("{:.1}%", rate)
}

/// Reduces a user's projects and interaction records under one [`MetricsPolicy`]
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
	policy: MetricsPolicy,
}

impl MetricsEngine {
	pub fn new(policy: MetricsPolicy) -> Self {
		Self { policy }
	}

	pub fn from_settings(settings: &MetricsSettings) -> Self {
		Self::new(MetricsPolicy::from(settings))
	}

	pub fn policy(&self) -> &MetricsPolicy {
		&self.policy
	}

	/// Roll up `owned` projects plus the user's own `votes` and `comments`
	///
	/// Empty input yields zeros and empty lists.
	pub fn compute_user_metrics<'a, I>(
		&self,
		owned: I,
		votes: &[Vote],
		comments: &[Comment],
	) -> MetricsReport<'a>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		self.compute_user_metrics_at(owned, votes, comments, Utc::now())
	}

	/// [`compute_user_metrics`](Self::compute_user_metrics) with the trend window ending
	/// on the day of `now`
	pub fn compute_user_metrics_at<'a, I>(
		&self,
		owned: I,
		votes: &[Vote],
		comments: &[Comment],
		now: DateTime<Utc>,
	) -> MetricsReport<'a>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		let owned: Vec<&'a Project> = owned.into_iter().collect();

		let total_views = saturating_sum(owned.iter().map(|p| p.views_count));
		let total_votes = saturating_sum(owned.iter().map(|p| p.votes_count));
		let total_comments = saturating_sum(owned.iter().map(|p| p.comments_count));
		let metrics = UserMetrics {
			total_views,
			total_votes,
			total_comments,
			total_interactions: (votes.len() as u64).saturating_add(comments.len() as u64),
			interactions_received: total_votes.saturating_add(total_comments),
			engagement_rate: engagement_rate(total_votes, total_comments, total_views),
			project_count: owned.len(),
			completion_rate: None,
			average_time_on_page: None,
		};

		let mut tag_usage = tag_frequencies(owned.iter().copied());
		tag_usage.truncate(self.policy.top_tags_limit);

		MetricsReport {
			metrics,
			top_projects: self.top_projects(&owned),
			tag_usage,
			recent_activity: self.recent_activity(&owned),
			trend: interaction_trend(votes, comments, now, self.policy.trend_window_days),
		}
	}

	/// Most voted first, then most commented, then most viewed
	fn top_projects<'a>(&self, owned: &[&'a Project]) -> Vec<RankedProject<'a>> {
		let mut ranked = owned.to_vec();
		ranked.sort_by(|a, b| {
			b.votes_count
				.cmp(&a.votes_count)
				.then_with(|| b.comments_count.cmp(&a.comments_count))
				.then_with(|| b.views_count.cmp(&a.views_count))
		});
		ranked
			.into_iter()
			.take(self.policy.top_projects_limit)
			.enumerate()
			.map(|(index, project)| RankedProject {
				rank: index + 1,
				project,
			})
			.collect()
	}

	/// Most recently created projects, standing in for an activity feed
	fn recent_activity<'a>(&self, owned: &[&'a Project]) -> Vec<&'a Project> {
		let mut recent = owned.to_vec();
		recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		recent.truncate(self.policy.recent_activity_limit);
		recent
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use showcase_core::ProfileId;

	fn project(votes: u64, comments: u64, views: u64) -> Project {
		let mut project = Project::new(ProfileId::new(), format!("{}/{}/{}", votes, comments, views));
		project.votes_count = votes;
		project.comments_count = comments;
		project.views_count = views;
		project
	}

	#[rstest]
	#[case(6, 3, 35, 25.714)]
	#[case(0, 0, 0, 0.0)]
	#[case(4, 1, 0, 500.0)]
	fn test_engagement_rate(#[case] votes: u64, #[case] comments: u64, #[case] views: u64, #[case] expected: f64) {
		assert!((engagement_rate(votes, comments, views) - expected).abs() < 0.001);
	}

	#[rstest]
	#[case(25.714, "25.7%")]
	#[case(0.0, "0.0%")]
	#[case(100.0, "100.0%")]
	fn test_format(#[case] rate: f64, #[case] expected: &str) {
		assert_eq!(format_engagement_rate(rate), expected);
	}

	#[test]
	fn test_huge_counters_saturate() {
		let projects = vec![project(u64::MAX, u64::MAX, 0), project(1, 0, u64::MAX)];

		let metrics = MetricsEngine::default()
			.compute_user_metrics(&projects, &[], &[])
			.metrics;

		assert_eq!(metrics.total_votes, u64::MAX);
		assert_eq!(metrics.total_views, u64::MAX);
		assert_eq!(metrics.interactions_received, u64::MAX);
		assert!(engagement_rate(u64::MAX, u64::MAX, 1).is_finite());
	}

	#[test]
	fn test_ranking_tie_breaks() {
		let projects = vec![
			project(5, 1, 100),
			project(5, 2, 10),
			project(5, 2, 50),
			project(9, 0, 0),
		];

		let report = MetricsEngine::default().compute_user_metrics(&projects, &[], &[]);

		let order: Vec<(usize, &str)> = report
			.top_projects
			.iter()
			.map(|ranked| (ranked.rank, ranked.project.title.as_str()))
			.collect();
		assert_eq!(
			order,
			vec![(1, "9/0/0"), (2, "5/2/50"), (3, "5/2/10"), (4, "5/1/100")]
		);
	}

	#[test]
	fn test_limits_apply() {
		let projects: Vec<Project> = (0..8).map(|i| project(i, 0, 0)).collect();
		let mut settings = MetricsSettings::default();
		settings.top_projects_limit = 2;
		settings.recent_activity_limit = 1;

		let report = MetricsEngine::from_settings(&settings).compute_user_metrics(&projects, &[], &[]);

		assert_eq!(report.top_projects.len(), 2);
		assert_eq!(report.top_projects[0].project.votes_count, 7);
		assert_eq!(report.recent_activity.len(), 1);
	}
}
