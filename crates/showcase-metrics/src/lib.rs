//! # showcase-metrics
//!
//! The Metrics Rollup Engine: reduces a user's owned projects and the interaction records
//! they authored into dashboard numbers.
//!
//! ## Outputs
//!
//! - Totals of views, votes and comments received on owned projects
//! - `total_interactions` (records the user made) next to `interactions_received`
//! - Engagement rate, `(votes + comments) / max(views, 1) * 100`
//! - Top projects (1-based ranks), tag-usage histogram, most recent projects
//! - Daily interaction trend ([`interaction_trend`])
//!
//! ## Example
//!
//! ```rust,ignore
//! let input = MetricsLoader::new(repository).load(user, &scope).await?;
//! let report = MetricsEngine::default().compute_user_metrics(&input.projects, &input.votes, &input.comments);
//! println!("{}", format_engagement_rate(report.metrics.engagement_rate));
//! ```

pub mod loader;
pub mod rollup;
pub mod trend;

pub use loader::{MetricsInput, MetricsLoader, MetricsSource};
pub use rollup::{
	MetricsEngine, MetricsPolicy, MetricsReport, RankedProject, UserMetrics, engagement_rate,
	format_engagement_rate,
};
pub use trend::{TrendPoint, interaction_trend};
