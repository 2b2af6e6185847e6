//! Error taxonomy of the interaction layer
//!
//! Mutation failures never escape the controller as panics: they are turned into a
//! rollback plus one of these values.

use thiserror::Error;

/// Errors surfaced to the UI layer
#[derive(Debug, Error)]
pub enum ShowcaseError {
	/// A mutation was attempted without an active session; the caller redirects to login
	#[error("Authentication required")]
	Unauthenticated,

	/// A write violated a uniqueness constraint, e.g. a duplicate vote from a race
	#[error("Conflict on {entity}: {message}")]
	Conflict { entity: String, message: String },

	/// Transport failure talking to the remote store
	#[error("Network error: {0}")]
	Network(String),

	/// The referenced row vanished between read and write
	#[error("{entity} not found: {key}")]
	NotFound { entity: String, key: String },

	/// Malformed input rejected before any write was attempted
	#[error("Validation error: {0}")]
	Validation(String),

	/// The session user may not perform the operation
	#[error("Permission denied: {0}")]
	PermissionDenied(String),

	/// The view that issued the operation was torn down
	#[error("View was torn down before the operation completed")]
	Cancelled,
}

impl ShowcaseError {
	/// Whether the UI should show a non-fatal notice and keep the view usable
	///
	/// `Unauthenticated` requires a redirect and `Cancelled` has no view left to notify.
	pub fn is_recoverable(&self) -> bool {
		!matches!(self, Self::Unauthenticated | Self::Cancelled)
	}

	/// Whether the stale entity should be evicted from the local cache
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

impl From<validator::ValidationErrors> for ShowcaseError {
	fn from(errors: validator::ValidationErrors) -> Self {
		Self::Validation(errors.to_string())
	}
}

/// Result type for showcase operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;
