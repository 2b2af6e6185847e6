//! # showcase-feed
//!
//! The Feed Aggregator: derives the visible project list of a discovery view from the
//! fetched working set, a free-text search term and one category filter.
//!
//! ## Rules
//!
//! - Search is a case-insensitive substring match on title, description, author username
//!   and tags; an empty term matches everything.
//! - Filters: `all`, `featured`, `trending` (votes above the configured threshold),
//!   `recent` (created inside the configured window), or any other value as a literal tag.
//! - `trending` is ordered by votes, every other filter newest first.
//! - Chip counts ignore the search term and are computed over the full set.
//! - The tag universe is the first N distinct tags in input order.
//!
//! Every function borrows its input and returns references into it, so a feed can never
//! contain a project that was not passed in.

pub mod aggregator;
pub mod filter;
pub mod search;
pub mod tags;

pub use aggregator::{FeedAggregator, FilterChip};
pub use filter::{FeedFilter, FeedPolicy};
pub use search::{SearchTerm, Searchable};
pub use tags::{TagCount, tag_frequencies, tag_universe};
