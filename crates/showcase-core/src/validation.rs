//! Input validation
//!
//! Runs before any write is attempted. A failure here never reaches the store.

use crate::ids::ProjectId;
use validator::{Validate, ValidationError};

/// Upper bound on comment length, mirrored by the `length` rule on [`NewComment`]
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Comment submission
#[derive(Debug, Clone, Validate)]
pub struct NewComment {
	pub project_id: ProjectId,

	#[validate(
		length(max = 2000, message = "Comment is too long"),
		custom(function = "validate_not_blank")
	)]
	pub content: String,
}

impl NewComment {
	pub fn new(project_id: ProjectId, content: impl Into<String>) -> Self {
		Self {
			project_id,
			content: content.into(),
		}
	}
}

fn validate_not_blank(content: &str) -> Result<(), ValidationError> {
	if content.trim().is_empty() {
		let mut error = ValidationError::new("blank");
		error.message = Some("Comment must not be empty".into());
		return Err(error);
	}
	Ok(())
}
