//! Query model
//!
//! Mirrors what the core needs from the store: equality and in-list filters, a single
//! ordering field, an optional limit, and join-style inclusion of a referenced row.

use crate::entity::Entity;
use serde_json::Value;

/// Row predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	/// `field = value`
	Eq { field: String, value: Value },
	/// `field IN (values)`; an empty list matches nothing
	In { field: String, values: Vec<Value> },
}

impl Filter {
	pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Eq {
			field: field.into(),
			value: value.into(),
		}
	}

	pub fn in_list<I, V>(field: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::In {
			field: field.into(),
			values: values.into_iter().map(Into::into).collect(),
		}
	}

	pub fn field(&self) -> &str {
		match self {
			Self::Eq { field, .. } | Self::In { field, .. } => field,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Asc,
	Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
	pub field: String,
	pub direction: Direction,
}

/// Join-style inclusion of a referenced row
///
/// For each selected row, the first row of `entity` whose `foreign_field` equals the
/// row's `local_field` is embedded under `alias`. Rows without a match carry no `alias`
/// key at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
	pub alias: String,
	pub entity: Entity,
	pub local_field: String,
	pub foreign_field: String,
}

impl Include {
	pub fn new(
		alias: impl Into<String>,
		entity: Entity,
		local_field: impl Into<String>,
		foreign_field: impl Into<String>,
	) -> Self {
		Self {
			alias: alias.into(),
			entity,
			local_field: local_field.into(),
			foreign_field: foreign_field.into(),
		}
	}
}

/// A `select` request
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	pub entity: Entity,
	pub filters: Vec<Filter>,
	pub order: Option<OrderBy>,
	pub limit: Option<usize>,
	pub includes: Vec<Include>,
}

impl Query {
	pub fn new(entity: Entity) -> Self {
		Self {
			entity,
			filters: Vec::new(),
			order: None,
			limit: None,
			includes: Vec::new(),
		}
	}

	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.filter(Filter::eq(field, value))
	}

	pub fn in_list<I, V>(self, field: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		self.filter(Filter::in_list(field, values))
	}

	pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
		self.order = Some(OrderBy {
			field: field.into(),
			direction,
		});
		self
	}

	pub fn order_desc(self, field: impl Into<String>) -> Self {
		self.order_by(field, Direction::Desc)
	}

	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn include(mut self, include: Include) -> Self {
		self.includes.push(include);
		self
	}
}
