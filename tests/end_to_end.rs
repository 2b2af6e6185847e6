//! Interaction, feed and metrics layers working over one store

use rstest::*;
use showcase::metrics::format_engagement_rate;
use showcase::prelude::*;
use showcase::store::StoreClient;
use showcase_test::fixtures::*;

#[rstest]
#[tokio::test]
async fn test_vote_flows_into_feed_and_metrics(world: SeededWorld) {
	// Arrange
	let settings = ShowcaseSettings::default();
	let store: Arc<dyn RemoteStore> = Arc::new(StoreClient::new(world.store.clone(), &settings.store));
	let view = MountedView::mount(world.viewer_session(), store.clone());
	view.loader.load_discover(None).await.unwrap();
	let compiler = world.project(0).id;

	// Act
	for _ in 0..settings.feed.trending_threshold {
		let voter = Arc::new(SessionContext::authenticated(Profile::new("fan")));
		let fan_view = MountedView::mount(voter, store.clone());
		fan_view.loader.load_discover(None).await.unwrap();
		fan_view.controller.toggle_vote(compiler).await.unwrap();
	}
	view.loader.load_discover(None).await.unwrap();
	let outcome = view.controller.toggle_vote(compiler).await.unwrap();

	// Assert
	assert_eq!(outcome, ToggleOutcome::Committed { active: true });
	let cache = view.cache.read();
	let aggregator = FeedAggregator::from_settings(&settings.feed);
	let trending: Vec<&str> = aggregator
		.compute_feed(cache.confirmed_projects(), "", &FeedFilter::Trending)
		.into_iter()
		.map(|project| project.title.as_str())
		.collect();
	assert_eq!(trending, vec!["Compiler", "Static site"]);

	let input = MetricsLoader::new(Repository::new(store.clone()))
		.load(world.author.id, &ViewScope::new())
		.await
		.unwrap();
	let report = MetricsEngine::from_settings(&settings.metrics).compute_user_metrics(
		&input.projects,
		&input.votes,
		&input.comments,
	);
	assert_eq!(report.metrics.total_votes, 11 + 5 + 12);
	assert_eq!(report.metrics.total_comments, 2);
	assert_eq!(report.top_projects[0].project.title, "Compiler");
	// nothing has been viewed; the rate divides by one
	assert_eq!(format_engagement_rate(report.metrics.engagement_rate), "3000.0%");
}

#[rstest]
#[tokio::test]
async fn test_logout_cancels_the_mounted_view(world: SeededWorld) {
	let session = world.viewer_session();
	let view = MountedView::mount(session.clone(), world.store.clone());
	view.loader.load_discover(None).await.unwrap();

	session.logout();
	let result = view.controller.toggle_vote(world.project(1).id).await;

	assert!(matches!(
		result,
		Err(ShowcaseError::Cancelled | ShowcaseError::Unauthenticated)
	));
	assert_eq!(world.project(1).votes_count, 5);
	assert_eq!(
		view.cache.read().confirmed(world.project(1).id).map(|c| c.project.votes_count),
		Some(5)
	);
}

#[test]
fn test_settings_from_toml_drive_the_policies() {
	let settings = ShowcaseSettings::from_toml_str(
		r#"
		[feed]
		trending_threshold = 3

		[metrics]
		top_tags_limit = 2
		"#,
	)
	.unwrap();

	let aggregator = FeedAggregator::from_settings(&settings.feed);
	let engine = MetricsEngine::from_settings(&settings.metrics);

	assert_eq!(aggregator.policy().trending_threshold, 3);
	assert_eq!(engine.policy().top_tags_limit, 2);
	assert_eq!(engine.policy().top_projects_limit, 5);
}
