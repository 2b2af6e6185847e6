//! Typed identifiers
//!
//! Every persisted entity is keyed by a UUID. Wrapping them keeps a project id from
//! being passed where a profile id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Generate a fresh random identifier
			pub fn new() -> Self {
				Self(Uuid::new_v4())
			}

			/// Wrap an existing UUID
			pub const fn from_uuid(uuid: Uuid) -> Self {
				Self(uuid)
			}

			pub const fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl Default for $name {
			fn default() -> Self {
				Self::new()
			}
		}

		impl From<Uuid> for $name {
			fn from(uuid: Uuid) -> Self {
				Self(uuid)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				self.0.fmt(f)
			}
		}
	};
}

uuid_id!(
	/// Identifier of a [`Profile`](crate::Profile)
	ProfileId
);
uuid_id!(
	/// Identifier of a [`Project`](crate::Project)
	ProjectId
);
uuid_id!(
	/// Identifier of a [`Comment`](crate::Comment)
	CommentId
);
