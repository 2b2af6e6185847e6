//! Quantified rollup laws

use proptest::prelude::*;
use showcase_core::{ProfileId, Project};
use showcase_metrics::MetricsEngine;

fn arb_project() -> impl Strategy<Value = Project> {
	(
		0u64..1000,
		0u64..100,
		0u64..100,
		prop::collection::hash_set("[a-h]", 0..5),
	)
		.prop_map(|(views, votes, comments, tags)| {
			let mut project = Project::new(ProfileId::new(), "p");
			project.views_count = views;
			project.votes_count = votes;
			project.comments_count = comments;
			project.tags = tags.into_iter().collect();
			project
		})
}

proptest! {
	#[test]
	fn prop_histogram_conserves_pairs(projects in prop::collection::vec(arb_project(), 0..15)) {
		let mut settings = showcase_conf::MetricsSettings::default();
		settings.top_tags_limit = usize::MAX;
		let report = MetricsEngine::from_settings(&settings).compute_user_metrics(&projects, &[], &[]);

		let pairs: usize = projects.iter().map(|p| p.tags.len()).sum();
		let counted: usize = report.tag_usage.iter().map(|t| t.count).sum();
		prop_assert_eq!(counted, pairs);
		prop_assert!(report.tag_usage.windows(2).all(|w| w[0].count >= w[1].count));
	}

	#[test]
	fn prop_ranking_is_ordered_and_one_based(projects in prop::collection::vec(arb_project(), 0..15)) {
		let report = MetricsEngine::default().compute_user_metrics(&projects, &[], &[]);

		prop_assert_eq!(report.top_projects.len(), projects.len().min(5));
		for (index, ranked) in report.top_projects.iter().enumerate() {
			prop_assert_eq!(ranked.rank, index + 1);
		}
		prop_assert!(report.top_projects.windows(2).all(|w| {
			let (a, b) = (w[0].project, w[1].project);
			(a.votes_count, a.comments_count, a.views_count) >= (b.votes_count, b.comments_count, b.views_count)
		}), "top_projects not ordered by (votes, comments, views) descending");
		prop_assert!(report.metrics.engagement_rate >= 0.0);
	}
}
