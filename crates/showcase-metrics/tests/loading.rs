//! Metrics loading with partial failures

use rstest::*;
use showcase_core::{Comment, ShowcaseError, ViewScope, Vote};
use showcase_metrics::{MetricsEngine, MetricsLoader, MetricsSource};
use showcase_store::{Entity, Repository, StoreError, StoreOperation};
use showcase_test::fixtures::*;

#[rstest]
#[tokio::test]
async fn test_full_load(world: SeededWorld) {
	// Arrange
	let author = world.author.id;
	world
		.store
		.seed(Entity::Votes, &[Vote::new(author, world.project(0).id)])
		.unwrap();
	world
		.store
		.seed(Entity::Comments, &[Comment::new(world.project(1).id, author, "thanks")])
		.unwrap();
	let loader = MetricsLoader::new(Repository::new(world.store.clone()));

	// Act
	let input = loader.load(author, &ViewScope::new()).await.unwrap();
	let report = MetricsEngine::default().compute_user_metrics(&input.projects, &input.votes, &input.comments);

	// Assert
	assert!(input.is_complete());
	assert_eq!(report.metrics.project_count, 3);
	assert_eq!(report.metrics.total_votes, 17);
	assert_eq!(report.metrics.total_interactions, 2);
	assert_eq!(report.recent_activity[0].title, "Compiler");
	assert_eq!(report.recent_activity[0].author_username(), Some("ada"));
}

#[rstest]
#[tokio::test]
async fn test_failed_part_degrades_to_empty(world: SeededWorld) {
	world.store.fail_next(
		StoreOperation::Select,
		Entity::Votes,
		StoreError::Network("offline".to_string()),
	);
	let loader = MetricsLoader::new(Repository::new(world.store.clone()));

	let input = loader.load(world.author.id, &ViewScope::new()).await.unwrap();

	assert_eq!(input.degraded, vec![MetricsSource::Votes]);
	assert!(input.votes.is_empty());
	assert_eq!(input.projects.len(), 3);
}

#[rstest]
#[tokio::test]
async fn test_everything_failing_still_yields_zero_metrics(world: SeededWorld) {
	for entity in [Entity::Projects, Entity::Votes, Entity::Comments] {
		world.store.fail_next(
			StoreOperation::Select,
			entity,
			StoreError::Network("offline".to_string()),
		);
	}
	let loader = MetricsLoader::new(Repository::new(world.store.clone()));

	let input = loader.load(world.author.id, &ViewScope::new()).await.unwrap();
	let report = MetricsEngine::default().compute_user_metrics(&input.projects, &input.votes, &input.comments);

	assert_eq!(input.degraded.len(), 3);
	assert_eq!(report.metrics.total_views, 0);
	assert_eq!(report.metrics.engagement_rate, 0.0);
}

#[rstest]
#[tokio::test]
async fn test_torn_down_view_gets_nothing(world: SeededWorld) {
	let loader = MetricsLoader::new(Repository::new(world.store.clone()));
	let scope = ViewScope::new();
	scope.teardown();

	let result = loader.load(world.author.id, &scope).await;

	assert!(matches!(result, Err(ShowcaseError::Cancelled)));
}
