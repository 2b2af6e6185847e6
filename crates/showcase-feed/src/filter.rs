//! Category filters and the policy behind them

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use showcase_conf::FeedSettings;
use showcase_core::Project;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The single active category filter of a feed
///
/// Any value other than the reserved names is a literal tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedFilter {
	#[default]
	All,
	Featured,
	Trending,
	Recent,
	Tag(String),
}

impl FeedFilter {
	pub fn parse(value: &str) -> Self {
		match value {
			"all" => Self::All,
			"featured" => Self::Featured,
			"trending" => Self::Trending,
			"recent" => Self::Recent,
			tag => Self::Tag(tag.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::All => "all",
			Self::Featured => "featured",
			Self::Trending => "trending",
			Self::Recent => "recent",
			Self::Tag(tag) => tag,
		}
	}

	/// The fixed, non-tag filters in chip order
	pub fn categories() -> [FeedFilter; 4] {
		[Self::All, Self::Featured, Self::Trending, Self::Recent]
	}
}

impl fmt::Display for FeedFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FeedFilter {
	type Err = Infallible;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(value))
	}
}

impl From<String> for FeedFilter {
	fn from(value: String) -> Self {
		Self::parse(&value)
	}
}

impl From<FeedFilter> for String {
	fn from(filter: FeedFilter) -> Self {
		filter.as_str().to_string()
	}
}

/// Thresholds deciding the `trending` and `recent` categories
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPolicy {
	/// Trending means `votes_count` strictly above this
	pub trending_threshold: u64,
	pub recent_window: Duration,
	/// Number of tags offered as chips
	pub tag_chip_limit: usize,
}

impl Default for FeedPolicy {
	fn default() -> Self {
		Self::from(&FeedSettings::default())
	}
}

impl From<&FeedSettings> for FeedPolicy {
	fn from(settings: &FeedSettings) -> Self {
		Self {
			trending_threshold: settings.trending_threshold,
			recent_window: Duration::days(i64::from(settings.recent_window_days)),
			tag_chip_limit: settings.tag_chip_limit,
		}
	}
}

impl FeedPolicy {
	pub fn is_trending(&self, project: &Project) -> bool {
		project.votes_count > self.trending_threshold
	}

	/// Created within the window ending at `now`; future timestamps count as recent
	pub fn is_recent(&self, project: &Project, now: DateTime<Utc>) -> bool {
		project.created_at >= now - self.recent_window
	}

	/// Category predicate, independent of any search term
	pub fn matches(&self, project: &Project, filter: &FeedFilter, now: DateTime<Utc>) -> bool {
		match filter {
			FeedFilter::All => true,
			FeedFilter::Featured => project.is_featured,
			FeedFilter::Trending => self.is_trending(project),
			FeedFilter::Recent => self.is_recent(project, now),
			FeedFilter::Tag(tag) => project.has_tag(tag),
		}
	}
}
