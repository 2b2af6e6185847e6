//! Model definitions mirrored from the remote store
//!
//! This module contains the persisted entities the core reads and writes:
//! - `Profile`: identity record, the display key is `username`
//! - `Project`: shared artifact with denormalized counters
//! - `Vote` / `Bookmark`: unique (user, project) relationship facts
//! - `Comment`: append-only discussion entry

pub mod bookmark;
pub mod comment;
pub mod profile;
pub mod project;
pub mod vote;

pub use bookmark::Bookmark;
pub use comment::Comment;
pub use profile::Profile;
pub use project::{Project, ProjectLinks};
pub use vote::Vote;
