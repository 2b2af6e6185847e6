//! Free-text search

use showcase_core::Project;

/// Values exposed to free-text search
pub trait Searchable {
	/// Every text a search term may match, in no particular order
	fn search_texts(&self) -> Vec<&str>;
}

impl Searchable for Project {
	fn search_texts(&self) -> Vec<&str> {
		let mut texts = vec![self.title.as_str(), self.description.as_str()];
		texts.extend(self.author_username());
		texts.extend(self.tags.iter().map(String::as_str));
		texts
	}
}

/// Lower-cased search term; `None` when it matches everything
///
/// Only the empty term matches everything. Whitespace is part of the term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(Option<String>);

impl SearchTerm {
	pub fn new(term: &str) -> Self {
		Self((!term.is_empty()).then(|| term.to_lowercase()))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_none()
	}

	/// Case-insensitive substring match against any searchable text
	pub fn matches<S: Searchable + ?Sized>(&self, item: &S) -> bool {
		let Some(term) = &self.0 else {
			return true;
		};
		item.search_texts()
			.into_iter()
			.any(|text| text.to_lowercase().contains(term.as_str()))
	}
}
