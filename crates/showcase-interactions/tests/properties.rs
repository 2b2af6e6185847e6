//! Convergence of arbitrary toggle sequences

mod common;

use common::*;
use proptest::prelude::*;
use showcase_interactions::MountedView;
use showcase_store::{Entity, StoreError, StoreOperation};
use showcase_test::fixtures::world;

#[derive(Debug, Clone, Copy)]
enum Step {
	Toggle,
	FailRow,
	FailCounter,
}

fn step() -> impl Strategy<Value = Step> {
	prop_oneof![
		3 => Just(Step::Toggle),
		1 => Just(Step::FailRow),
		1 => Just(Step::FailCounter),
	]
}

proptest! {
	#[test]
	fn prop_toggles_converge(steps in prop::collection::vec(step(), 1..24)) {
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.unwrap();
		runtime.block_on(async {
			let world = world();
			let project = world.project(1).id;
			let others = world.project(1).votes_count;
			let view: MountedView = viewer_view(&world).await;

			for step in steps {
				let voted = view.cache.read().displayed(project).unwrap().voted;
				match step {
					Step::Toggle => {}
					Step::FailRow => world.store.fail_next(
						if voted { StoreOperation::Delete } else { StoreOperation::Insert },
						Entity::Votes,
						StoreError::Network("dropped".to_string()),
					),
					Step::FailCounter => world.store.fail_next(
						StoreOperation::Update,
						Entity::Projects,
						StoreError::Network("dropped".to_string()),
					),
				}
				let result = view.controller.toggle_vote(project).await;

				let (count, shown) = shown_vote(&view, project);
				prop_assert_eq!(count, others + u64::from(shown));
				prop_assert_eq!(confirmed_votes(&view, project), count);
				prop_assert!(pair_rows(&world.store, Entity::Votes, world.viewer.id, project) <= 1);
				if result.is_ok() {
					prop_assert_eq!(shown, !voted);
					prop_assert_eq!(stored_votes(&world.store, project).await, count);
					prop_assert_eq!(
						pair_rows(&world.store, Entity::Votes, world.viewer.id, project),
						usize::from(shown)
					);
				} else {
					prop_assert_eq!(shown, voted);
				}
			}
			Ok(())
		})?;
	}
}
