//! # showcase-interactions
//!
//! The write side of the showcase core: toggles with immediate local feedback, and the
//! per-view cache they act on.
//!
//! ## Components
//!
//! - [`EntityCache`]: confirmed snapshot plus pending overlays; aggregation reads only the
//!   confirmed layer
//! - [`MutationController`]: `toggle_vote` / `toggle_bookmark` with supersede and rollback,
//!   driven by the pure [`reduce`] state machine and observable through
//!   [`MutationController::subscribe`]
//! - [`CommentService`]: validated comment posting and author/owner deletion
//! - [`ViewLoader`]: fetch and reconcile working sets
//! - [`MountedView`]: one view's cache, scope and services wired together
//!
//! ## Example
//!
//! ```rust,ignore
//! use showcase_interactions::MountedView;
//!
//! let view = MountedView::mount(session.clone(), store.clone());
//! view.loader.load_discover(Some(50)).await?;
//! view.controller.toggle_vote(project_id).await?;
//! let shown = view.cache.read().displayed(project_id);
//! ```

pub mod cache;
pub mod comments;
pub mod controller;
pub mod loader;
pub mod state;
pub mod view;

pub use cache::{CachedProject, DisplayedProject, EntityCache, SharedCache, adjusted_count};
pub use comments::CommentService;
pub use controller::{MutationController, ToggleOutcome};
pub use loader::{LoadSummary, ViewLoader};
pub use state::{MutationAction, MutationEvent, MutationKey, MutationKind, MutationPhase, reduce};
pub use view::MountedView;
