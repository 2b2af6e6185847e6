//! Store errors

use crate::entity::Entity;
use showcase_core::ShowcaseError;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by a [`RemoteStore`](crate::RemoteStore)
#[derive(Debug, Clone, Error)]
pub enum StoreError {
	/// A uniqueness constraint rejected the write
	#[error("Unique constraint violated on {entity}: {message}")]
	Conflict { entity: Entity, message: String },

	/// No row matched a delete or update
	#[error("No {entity} row matches {key}")]
	NotFound { entity: Entity, key: String },

	/// Transport failure
	#[error("Network error: {0}")]
	Network(String),

	/// The request did not complete within the configured timeout
	#[error("Request timed out after {0:?}")]
	Timeout(Duration),

	/// A row could not be mapped to or from a model
	#[error("Decode error: {0}")]
	Decode(String),

	/// The query references something the store cannot evaluate
	#[error("Invalid query: {0}")]
	InvalidQuery(String),
}

impl StoreError {
	pub fn entity(&self) -> Option<Entity> {
		match self {
			Self::Conflict { entity, .. } | Self::NotFound { entity, .. } => Some(*entity),
			_ => None,
		}
	}
}

impl From<serde_json::Error> for StoreError {
	fn from(error: serde_json::Error) -> Self {
		Self::Decode(error.to_string())
	}
}

impl From<StoreError> for ShowcaseError {
	fn from(error: StoreError) -> Self {
		match error {
			StoreError::Conflict { entity, message } => ShowcaseError::Conflict {
				entity: entity.to_string(),
				message,
			},
			StoreError::NotFound { entity, key } => ShowcaseError::NotFound {
				entity: entity.to_string(),
				key,
			},
			StoreError::Network(message) => ShowcaseError::Network(message),
			StoreError::Timeout(after) => {
				ShowcaseError::Network(format!("request timed out after {:?}", after))
			}
			// Malformed rows and queries are transport-level failures from the UI's view.
			StoreError::Decode(message) | StoreError::InvalidQuery(message) => {
				ShowcaseError::Network(message)
			}
		}
	}
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
