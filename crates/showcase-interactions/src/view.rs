//! Mounted view

use crate::cache::{EntityCache, SharedCache};
use crate::comments::CommentService;
use crate::controller::MutationController;
use crate::loader::ViewLoader;
use showcase_core::{SessionContext, ViewScope};
use showcase_store::{RemoteStore, Repository};
use std::sync::Arc;

/// Everything one view owns: its cache, its liveness scope and the services bound to both
///
/// The scope is derived from the session, so logout tears the view down as well.
pub struct MountedView {
	pub cache: SharedCache,
	pub scope: ViewScope,
	pub loader: ViewLoader,
	pub controller: MutationController,
	pub comments: CommentService,
}

impl MountedView {
	pub fn mount(session: Arc<SessionContext>, store: Arc<dyn RemoteStore>) -> Self {
		let repository = Repository::new(store);
		let cache = EntityCache::shared();
		let scope = session.view_scope();
		Self {
			loader: ViewLoader::new(
				session.clone(),
				repository.clone(),
				cache.clone(),
				scope.clone(),
			),
			controller: MutationController::new(
				session.clone(),
				repository.clone(),
				cache.clone(),
				scope.clone(),
			),
			comments: CommentService::new(session, repository, cache.clone(), scope.clone()),
			cache,
			scope,
		}
	}

	/// Navigate away; outstanding completions are no longer applied
	pub fn unmount(&self) {
		self.scope.teardown();
	}
}
