//! # showcase-core
//!
//! Shared vocabulary of the showcase interaction and aggregation layer.
//!
//! ## Contents
//!
//! - Entity models mirrored from the remote store: [`Profile`], [`Project`], [`Vote`],
//!   [`Comment`], [`Bookmark`]
//! - Typed identifiers ([`ProfileId`], [`ProjectId`], [`CommentId`])
//! - The error taxonomy surfaced to the UI ([`ShowcaseError`])
//! - Explicit session lifecycle ([`SessionContext`]) and per-view liveness ([`ViewScope`])
//! - Input validation applied before any write ([`NewComment`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use showcase_core::{Profile, SessionContext};
//!
//! let session = SessionContext::new();
//! session.login(Profile::new("ada"));
//! let view = session.view_scope();
//! assert!(view.is_alive());
//!
//! session.logout();
//! assert!(!view.is_alive());
//! ```

pub mod error;
pub mod ids;
pub mod models;
pub mod scope;
pub mod session;
pub mod validation;

pub use error::{Result, ShowcaseError};
pub use ids::{CommentId, ProfileId, ProjectId};
pub use models::{Bookmark, Comment, Profile, Project, ProjectLinks, Vote};
pub use scope::ViewScope;
pub use session::{Session, SessionContext};
pub use validation::{MAX_COMMENT_LENGTH, NewComment};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::error::{Result, ShowcaseError};
	pub use crate::ids::{CommentId, ProfileId, ProjectId};
	pub use crate::models::{Bookmark, Comment, Profile, Project, ProjectLinks, Vote};
	pub use crate::scope::ViewScope;
	pub use crate::session::{Session, SessionContext};
}
