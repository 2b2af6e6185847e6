//! Mutation state machine
//!
//! Every (user, project, kind) key moves through
//! `Idle -> Pending -> Committed | RolledBack -> Idle`. [`reduce`] is the only place
//! transitions are decided; the controller feeds it actions and publishes the result.

use showcase_core::{ProfileId, ProjectId};
use std::fmt;

/// Toggle-style relationship between a user and a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
	Vote,
	Bookmark,
}

impl fmt::Display for MutationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Vote => write!(f, "vote"),
			Self::Bookmark => write!(f, "bookmark"),
		}
	}
}

/// Identity of one mutation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationKey {
	pub user: ProfileId,
	pub project: ProjectId,
	pub kind: MutationKind,
}

impl MutationKey {
	pub fn new(user: ProfileId, project: ProjectId, kind: MutationKind) -> Self {
		Self {
			user,
			project,
			kind,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationPhase {
	/// Displayed state matches the last confirmed state
	#[default]
	Idle,
	/// Displayed state was flipped locally and a write is in flight
	Pending,
	/// The latest write succeeded; its value is now confirmed
	Committed,
	/// The latest write failed; the displayed state was reverted
	RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
	/// A toggle was issued, possibly superseding an in-flight one
	Begin,
	/// The latest request's writes succeeded
	Succeed,
	/// The latest request's writes failed
	Fail,
	/// Subscribers have seen the outcome
	Settle,
	/// The view went away or the entity left the cache
	Discard,
}

/// Pure transition function
///
/// Actions that make no sense in the current phase leave it unchanged, so a late
/// completion can never move a key out of a state it does not own.
pub fn reduce(phase: MutationPhase, action: MutationAction) -> MutationPhase {
	use MutationAction::*;
	use MutationPhase::*;

	match (phase, action) {
		(_, Begin) => Pending,
		(_, Discard) => Idle,
		(Pending, Succeed) => Committed,
		(Pending, Fail) => RolledBack,
		(Committed | RolledBack, Settle) => Idle,
		(phase, _) => phase,
	}
}

/// Phase change published to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationEvent {
	pub key: MutationKey,
	pub phase: MutationPhase,
	/// Relationship state shown to the user after this transition
	pub displayed: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use MutationAction::*;
	use MutationPhase::*;

	#[rstest]
	#[case(Idle, Begin, Pending)]
	#[case(Pending, Begin, Pending)]
	#[case(Pending, Succeed, Committed)]
	#[case(Pending, Fail, RolledBack)]
	#[case(Committed, Settle, Idle)]
	#[case(RolledBack, Settle, Idle)]
	#[case(Committed, Begin, Pending)]
	#[case(Pending, Discard, Idle)]
	fn test_transitions(
		#[case] from: MutationPhase,
		#[case] action: MutationAction,
		#[case] to: MutationPhase,
	) {
		assert_eq!(reduce(from, action), to);
	}

	#[rstest]
	#[case(Idle, Succeed)]
	#[case(Idle, Fail)]
	#[case(Idle, Settle)]
	#[case(Committed, Fail)]
	#[case(RolledBack, Succeed)]
	#[case(Pending, Settle)]
	fn test_unowned_actions_are_ignored(#[case] from: MutationPhase, #[case] action: MutationAction) {
		assert_eq!(reduce(from, action), from);
	}

	#[test]
	fn test_full_cycle() {
		let phase = [Begin, Begin, Succeed, Settle]
			.into_iter()
			.fold(Idle, reduce);
		assert_eq!(phase, Idle);
	}
}
