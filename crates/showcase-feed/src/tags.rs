//! Tag statistics over a working set

use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use showcase_core::Project;

/// One tag-frequency entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
	pub tag: String,
	pub count: usize,
}

/// Distinct tags in first-encountered order, truncated to `limit`
///
/// Order follows the input, not the alphabet.
pub fn tag_universe<'a, I>(projects: I, limit: usize) -> Vec<String>
where
	I: IntoIterator<Item = &'a Project>,
{
	let mut seen = IndexSet::new();
	for tag in projects.into_iter().flat_map(|project| project.tags.iter()) {
		if seen.len() == limit {
			break;
		}
		seen.insert(tag.as_str());
	}
	seen.into_iter().map(str::to_string).collect()
}

/// Occurrences of every tag, most frequent first
///
/// Each (project, tag) pair counts once, so the counts sum to the number of pairs. Ties
/// keep first-encountered order.
pub fn tag_frequencies<'a, I>(projects: I) -> Vec<TagCount>
where
	I: IntoIterator<Item = &'a Project>,
{
	let mut counts: IndexMap<&str, usize> = IndexMap::new();
	for project in projects {
		for tag in &project.tags {
			*counts.entry(tag.as_str()).or_default() += 1;
		}
	}
	let mut frequencies: Vec<TagCount> = counts
		.into_iter()
		.map(|(tag, count)| TagCount {
			tag: tag.to_string(),
			count,
		})
		.collect();
	frequencies.sort_by(|a, b| b.count.cmp(&a.count));
	frequencies
}
