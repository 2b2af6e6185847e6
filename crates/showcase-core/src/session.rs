//! Session lifecycle
//!
//! The session is an explicitly constructed object injected into the mutation controller
//! and loaders. `login` initialises it, `logout` tears it down together with every view
//! scope derived from it.

use crate::error::{Result, ShowcaseError};
use crate::ids::ProfileId;
use crate::models::Profile;
use crate::scope::ViewScope;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// An authenticated user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
	pub user: Profile,
	pub started_at: DateTime<Utc>,
}

impl Session {
	pub fn user_id(&self) -> ProfileId {
		self.user.id
	}
}

/// Holder of the current session
#[derive(Debug)]
pub struct SessionContext {
	current: RwLock<Option<Session>>,
	scope: RwLock<ViewScope>,
}

impl SessionContext {
	/// Create a context with no active session
	pub fn new() -> Self {
		Self {
			current: RwLock::new(None),
			scope: RwLock::new(ViewScope::new()),
		}
	}

	/// Create a context that is already logged in as `user`
	pub fn authenticated(user: Profile) -> Self {
		let context = Self::new();
		context.login(user);
		context
	}

	/// Start a session for `user`, replacing any previous one
	pub fn login(&self, user: Profile) -> Session {
		let session = Session {
			user,
			started_at: Utc::now(),
		};
		let previous = self.current.write().replace(session.clone());
		if previous.is_some() {
			// Views of the previous user must not receive this user's results.
			let stale = std::mem::take(&mut *self.scope.write());
			stale.teardown();
		}
		tracing::info!(user = %session.user.id, username = %session.user.username, "session started");
		session
	}

	/// End the session and tear down every view scope derived from it
	pub fn logout(&self) {
		let ended = self.current.write().take();
		let stale = std::mem::take(&mut *self.scope.write());
		stale.teardown();
		if let Some(session) = ended {
			tracing::info!(user = %session.user.id, "session ended");
		}
	}

	pub fn current(&self) -> Option<Session> {
		self.current.read().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.current.read().is_some()
	}

	/// Id of the acting user, or `Unauthenticated`
	pub fn require_user(&self) -> Result<ProfileId> {
		self.current
			.read()
			.as_ref()
			.map(Session::user_id)
			.ok_or(ShowcaseError::Unauthenticated)
	}

	/// Scope for a newly mounted view; torn down on logout
	pub fn view_scope(&self) -> ViewScope {
		self.scope.read().child()
	}
}

impl Default for SessionContext {
	fn default() -> Self {
		Self::new()
	}
}
