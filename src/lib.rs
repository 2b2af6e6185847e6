//! # Showcase
//!
//! Interaction and aggregation core for a social project-showcase platform.
//!
//! Users publish projects, vote for them, bookmark them and comment on them. This crate
//! gathers the pieces that keep those interactions consistent with a remote store and
//! derive the read-side views from them.
//!
//! ## Feature Flags
//!
//! - `interactions` - optimistic vote/bookmark toggles, comments and view loading
//! - `feed` - search, filters and filter-chip counts over a working set
//! - `metrics` - per-user dashboard rollups
//! - `logging` - a `tracing-subscriber` setup driven by [`conf::LoggingSettings`]
//! - `full` (default) - all of the above
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use showcase::prelude::*;
//!
//! let settings = ShowcaseSettings::from_env()?;
//! showcase::logging::init(&settings.logging)?;
//!
//! let session = Arc::new(SessionContext::authenticated(profile));
//! let view = MountedView::mount(session, store);
//! view.loader.load_discover(Some(50)).await?;
//! view.controller.toggle_vote(project_id).await?;
//!
//! let cache = view.cache.read();
//! let feed = FeedAggregator::from_settings(&settings.feed)
//! 	.compute_feed(cache.confirmed_projects(), "rust", &FeedFilter::Trending);
//! ```

pub use showcase_conf as conf;
pub use showcase_core as core;
pub use showcase_store as store;

#[cfg(feature = "feed")]
pub use showcase_feed as feed;
#[cfg(feature = "interactions")]
pub use showcase_interactions as interactions;
#[cfg(feature = "metrics")]
pub use showcase_metrics as metrics;

#[cfg(feature = "logging")]
pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
	pub use showcase_conf::ShowcaseSettings;
	pub use showcase_core::prelude::*;
	pub use showcase_store::{InMemoryStore, RemoteStore, Repository, StoreClient};
	pub use std::sync::Arc;

	#[cfg(feature = "feed")]
	pub use showcase_feed::{FeedAggregator, FeedFilter, FilterChip};
	#[cfg(feature = "interactions")]
	pub use showcase_interactions::{
		MountedView, MutationController, MutationKind, ToggleOutcome,
	};
	#[cfg(feature = "metrics")]
	pub use showcase_metrics::{MetricsEngine, MetricsLoader, UserMetrics};
}
