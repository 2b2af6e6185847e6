//! Metrics rollup over a user's projects

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rstest::*;
use showcase_core::{Comment, Profile, Project, ProjectId, Vote};
use showcase_metrics::{MetricsEngine, UserMetrics, format_engagement_rate};
use showcase_test::{ProfileFactory, ProjectFactory};

#[fixture]
fn owner() -> Profile {
	ProfileFactory::new("ada").build()
}

#[rstest]
fn test_dashboard_totals(owner: Profile) {
	// Arrange
	let now = Utc::now();
	let projects: Vec<Project> = [(10, 2, 1), (20, 3, 0), (5, 1, 2)]
		.into_iter()
		.enumerate()
		.map(|(age, (views, votes, comments))| {
			ProjectFactory::owned_by(&owner)
				.views(views)
				.votes(votes)
				.comments(comments)
				.days_old(now, age as i64)
				.build()
		})
		.collect();

	// Act
	let report = MetricsEngine::default().compute_user_metrics(&projects, &[], &[]);

	// Assert
	let metrics = &report.metrics;
	assert_eq!(metrics.total_views, 35);
	assert_eq!(metrics.total_votes, 6);
	assert_eq!(metrics.total_comments, 3);
	assert_eq!(metrics.interactions_received, 9);
	assert_eq!(metrics.project_count, 3);
	assert!((metrics.engagement_rate - 25.714).abs() < 0.001);
	assert_eq!(format_engagement_rate(metrics.engagement_rate), "25.7%");
}

#[rstest]
fn test_interactions_made_are_counted_from_records(owner: Profile) {
	let project = ProjectFactory::owned_by(&owner).votes(40).comments(12).build();
	let votes = vec![
		Vote::new(owner.id, ProjectId::new()),
		Vote::new(owner.id, ProjectId::new()),
	];
	let comments = vec![Comment::new(ProjectId::new(), owner.id, "nice")];

	let report = MetricsEngine::default().compute_user_metrics([&project], &votes, &comments);

	assert_eq!(report.metrics.total_interactions, 3);
	assert_eq!(report.metrics.interactions_received, 52);
}

#[test]
fn test_empty_input_is_all_zero() {
	let none: Vec<Project> = Vec::new();

	let report = MetricsEngine::default().compute_user_metrics(&none, &[], &[]);

	assert_eq!(report.metrics, UserMetrics::default());
	assert!(report.top_projects.is_empty());
	assert!(report.tag_usage.is_empty());
	assert!(report.recent_activity.is_empty());
	assert_eq!(report.trend.len(), 7);
	assert!(report.trend.iter().all(|point| point.total() == 0));
}

#[rstest]
fn test_trend_covers_configured_window(owner: Profile) {
	// Arrange
	let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
	let project = ProjectFactory::owned_by(&owner).build();
	let vote_at = |days: i64| {
		let mut vote = Vote::new(owner.id, project.id);
		vote.created_at = now - Duration::days(days);
		vote
	};
	let votes = vec![vote_at(0), vote_at(0), vote_at(2), vote_at(3)];
	let mut comment = Comment::new(project.id, owner.id, "first");
	comment.created_at = now - Duration::days(1);
	let mut settings = showcase_conf::MetricsSettings::default();
	settings.trend_window_days = 3;

	// Act
	let report = MetricsEngine::from_settings(&settings).compute_user_metrics_at(
		[&project],
		&votes,
		&[comment],
		now,
	);

	// Assert: oldest day first, the vote three days back falls outside
	let trend: Vec<(NaiveDate, usize, usize)> = report
		.trend
		.iter()
		.map(|point| (point.date, point.votes, point.comments))
		.collect();
	let day = |d: u32| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
	assert_eq!(trend, vec![(day(8), 1, 0), (day(9), 0, 1), (day(10), 2, 0)]);
	assert_eq!(report.metrics.total_interactions, 5);
}

#[rstest]
fn test_lists_are_truncated(owner: Profile) {
	// Arrange: eight projects, nine distinct tags
	let now = Utc::now();
	let tags = ["a", "b", "c", "d", "e", "f", "g", "h", "i"];
	let projects: Vec<Project> = (0..8)
		.map(|i| {
			ProjectFactory::owned_by(&owner)
				.title(format!("p{}", i))
				.votes(i)
				.tags([tags[i as usize], tags[i as usize + 1], "shared"])
				.days_old(now, i as i64)
				.build()
		})
		.collect();

	// Act
	let report = MetricsEngine::default().compute_user_metrics(&projects, &[], &[]);

	// Assert
	let ranks: Vec<(usize, &str)> = report
		.top_projects
		.iter()
		.map(|ranked| (ranked.rank, ranked.project.title.as_str()))
		.collect();
	assert_eq!(ranks, vec![(1, "p7"), (2, "p6"), (3, "p5"), (4, "p4"), (5, "p3")]);
	assert_eq!(report.tag_usage.len(), 6);
	assert_eq!(report.tag_usage[0].tag, "shared");
	assert_eq!(report.tag_usage[0].count, 8);
	let recent: Vec<&str> = report
		.recent_activity
		.iter()
		.map(|project| project.title.as_str())
		.collect();
	assert_eq!(recent, vec!["p0", "p1", "p2"]);
}

#[rstest]
fn test_report_serializes(owner: Profile) {
	let project = ProjectFactory::owned_by(&owner).tags(["rust"]).build();

	let report = MetricsEngine::default().compute_user_metrics([&project], &[], &[]);
	let json = serde_json::to_value(&report).unwrap();

	assert_eq!(json["metrics"]["project_count"], 1);
	assert_eq!(json["top_projects"][0]["rank"], 1);
	assert_eq!(json["tag_usage"][0]["tag"], "rust");
	assert!(json["metrics"]["completion_rate"].is_null());
	assert_eq!(json["trend"].as_array().map(Vec::len), Some(7));
}
