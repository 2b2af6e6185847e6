//! View liveness
//!
//! A [`ViewScope`] is handed to every async operation started on behalf of a view.
//! Completions call [`ViewScope::is_alive`] before committing results, so a view that was
//! navigated away from never sees late writes.

use crate::error::{Result, ShowcaseError};
use tokio_util::sync::CancellationToken;

/// Liveness token for one mounted view
///
/// Scopes form a tree: tearing down a parent (e.g. the session on logout) tears down every
/// scope derived from it with [`ViewScope::child`].
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
	token: CancellationToken,
}

impl ViewScope {
	pub fn new() -> Self {
		Self {
			token: CancellationToken::new(),
		}
	}

	/// Derive a scope that dies with `self`
	pub fn child(&self) -> Self {
		Self {
			token: self.token.child_token(),
		}
	}

	pub fn is_alive(&self) -> bool {
		!self.token.is_cancelled()
	}

	/// Mark the view as torn down
	pub fn teardown(&self) {
		self.token.cancel();
	}

	/// `Err(Cancelled)` once the view is gone
	pub fn ensure_alive(&self) -> Result<()> {
		if self.is_alive() {
			Ok(())
		} else {
			Err(ShowcaseError::Cancelled)
		}
	}

	/// Resolves when the view is torn down
	pub async fn torn_down(&self) {
		self.token.cancelled().await;
	}
}
