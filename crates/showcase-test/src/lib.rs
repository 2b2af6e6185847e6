//! # showcase-test
//!
//! Testing utilities for the showcase core.
//!
//! ## Features
//!
//! - **[`ProfileFactory`] / [`ProjectFactory`]**: builders for model values with sensible
//!   defaults
//! - **[`fixtures`]**: rstest fixtures for a seeded [`InMemoryStore`] and an authenticated
//!   session
//! - **[`GatedStore`]**: store double that parks every write until the test releases it,
//!   for exercising in-flight and superseded mutations deterministically
//! - **[`logging::init_test_logging`]**: one-time tracing subscriber writing to the test
//!   output capture
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use showcase_test::{GatedStore, ProjectFactory, fixtures::*};
//! use rstest::*;
//!
//! #[rstest]
//! #[tokio::test]
//! async fn test_vote_while_in_flight(world: SeededWorld) {
//! 	let gate = GatedStore::new(world.store.clone());
//! 	// spawn a toggle, inspect the optimistic state, then release the write
//! 	gate.release(1);
//! }
//! ```
//!
//! [`InMemoryStore`]: showcase_store::InMemoryStore

pub mod factory;
pub mod fixtures;
pub mod gate;
pub mod logging;

pub use factory::{ProfileFactory, ProjectFactory};
pub use fixtures::SeededWorld;
pub use gate::GatedStore;
