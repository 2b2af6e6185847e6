//! Feed aggregation
//!
//! Pure functions over an already fetched working set. Nothing here yields or fails: an
//! empty input gives an empty feed and zero counts.

use crate::filter::{FeedFilter, FeedPolicy};
use crate::search::SearchTerm;
use crate::tags::tag_universe;
use chrono::{DateTime, Utc};
use serde::Serialize;
use showcase_conf::FeedSettings;
use showcase_core::Project;

/// A filter chip with its match count over the full working set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
	pub filter: FeedFilter,
	pub count: usize,
}

/// Computes visible project lists and chip counts under one [`FeedPolicy`]
///
/// # Examples
///
/// ```
/// use showcase_feed::{FeedAggregator, FeedFilter};
/// use showcase_core::{Project, ProfileId};
///
/// let mut hot = Project::new(ProfileId::new(), "Hot");
/// hot.votes_count = 42;
/// let cold = Project::new(ProfileId::new(), "Cold");
/// let projects = vec![hot, cold];
///
/// let feed = FeedAggregator::default().compute_feed(&projects, "", &FeedFilter::Trending);
/// assert_eq!(feed.len(), 1);
/// assert_eq!(feed[0].title, "Hot");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeedAggregator {
	policy: FeedPolicy,
}

impl FeedAggregator {
	pub fn new(policy: FeedPolicy) -> Self {
		Self { policy }
	}

	pub fn from_settings(settings: &FeedSettings) -> Self {
		Self::new(FeedPolicy::from(settings))
	}

	pub fn policy(&self) -> &FeedPolicy {
		&self.policy
	}

	/// Visible projects for `term` and `filter`, evaluated at the current time
	pub fn compute_feed<'a, I>(&self, projects: I, term: &str, filter: &FeedFilter) -> Vec<&'a Project>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		self.compute_feed_at(projects, term, filter, Utc::now())
	}

	/// Visible projects for `term` and `filter`, with `recent` measured back from `now`
	///
	/// Returns references into the input: search first, then the category predicate, then
	/// `trending` ordered by votes (newest first on ties) and everything else newest first.
	pub fn compute_feed_at<'a, I>(
		&self,
		projects: I,
		term: &str,
		filter: &FeedFilter,
		now: DateTime<Utc>,
	) -> Vec<&'a Project>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		let term = SearchTerm::new(term);
		let mut feed: Vec<&Project> = projects
			.into_iter()
			.filter(|project| term.matches(*project))
			.filter(|project| self.policy.matches(project, filter, now))
			.collect();

		match filter {
			FeedFilter::Trending => feed.sort_by(|a, b| {
				b.votes_count
					.cmp(&a.votes_count)
					.then_with(|| b.created_at.cmp(&a.created_at))
			}),
			_ => feed.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
		}

		tracing::trace!(filter = %filter, visible = feed.len(), "feed computed");
		feed
	}

	/// Chip counts at the current time
	pub fn filter_counts<'a, I>(&self, projects: I) -> Vec<FilterChip>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		self.filter_counts_at(projects, Utc::now())
	}

	/// One chip per category followed by one per tag of the tag universe
	///
	/// Counts use the category predicate alone over the full set, so they do not change
	/// with the search box.
	pub fn filter_counts_at<'a, I>(&self, projects: I, now: DateTime<Utc>) -> Vec<FilterChip>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		let projects: Vec<&Project> = projects.into_iter().collect();
		let tags = tag_universe(projects.iter().copied(), self.policy.tag_chip_limit);

		FeedFilter::categories()
			.into_iter()
			.chain(tags.into_iter().map(FeedFilter::Tag))
			.map(|filter| FilterChip {
				count: projects
					.iter()
					.filter(|project| self.policy.matches(project, &filter, now))
					.count(),
				filter,
			})
			.collect()
	}

	/// Tags offered as chips
	pub fn tag_universe<'a, I>(&self, projects: I) -> Vec<String>
	where
		I: IntoIterator<Item = &'a Project>,
	{
		tag_universe(projects, self.policy.tag_chip_limit)
	}
}
