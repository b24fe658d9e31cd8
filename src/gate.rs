//! Action gating.
//!
//! A [`Gate`] decides whether a user action is currently permitted. The
//! evaluation order is fixed and shared by every action; only the table of
//! [`Rule`]s is action specific:
//!
//! 1. an action of the same view is in flight: disabled, "transaction in
//!    progress";
//! 2. no status has been loaded yet: disabled, "status unavailable";
//! 3. the first rule of the table that blocks: disabled with its reason;
//! 4. amount based action with a zero amount: disabled without a reason;
//! 5. otherwise enabled.

use {
	crate::{Error, tx::PendingAction},
	alloy::primitives::U256,
	core::fmt,
};

pub const IN_PROGRESS: &str = "transaction in progress";
pub const STATUS_UNAVAILABLE: &str = "status unavailable";

/// Whether an action is permitted right now, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
	pub enabled: bool,

	/// Shown to the user when disabled. `None` for idle states that are not
	/// errors, such as an empty amount field.
	pub reason: Option<&'static str>,
}

impl GateDecision {
	pub const fn enabled() -> Self {
		Self {
			enabled: true,
			reason: None,
		}
	}

	pub const fn disabled(reason: &'static str) -> Self {
		Self {
			enabled: false,
			reason: Some(reason),
		}
	}

	pub const fn idle() -> Self {
		Self {
			enabled: false,
			reason: None,
		}
	}
}

impl fmt::Display for GateDecision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.enabled, self.reason) {
			(true, _) => write!(f, "enabled"),
			(false, Some(reason)) => write!(f, "disabled ({reason})"),
			(false, None) => write!(f, "disabled"),
		}
	}
}

/// A view specific precondition. `blocks` returns true when the action must
/// be disabled for the given status and input amount.
pub struct Rule<S> {
	pub reason: &'static str,
	pub blocks: fn(&S, U256) -> bool,
}

impl<S> Rule<S> {
	pub const fn new(reason: &'static str, blocks: fn(&S, U256) -> bool) -> Self {
		Self { reason, blocks }
	}
}

/// Rule table of one user action.
pub struct Gate<S: 'static> {
	action: &'static str,
	rules: &'static [Rule<S>],
	amount_based: bool,
}

impl<S: 'static> Gate<S> {
	pub const fn new(action: &'static str, rules: &'static [Rule<S>]) -> Self {
		Self {
			action,
			rules,
			amount_based: false,
		}
	}

	/// Marks the action as taking an amount, so a zero input disables it.
	#[must_use]
	pub const fn with_amount(mut self) -> Self {
		self.amount_based = true;
		self
	}

	pub const fn action(&self) -> &'static str {
		self.action
	}

	/// Evaluates the gate. The first matching condition wins.
	pub fn evaluate(
		&self,
		status: Option<&S>,
		pending: &PendingAction,
		input: U256,
	) -> GateDecision {
		if pending.is_in_progress() {
			return GateDecision::disabled(IN_PROGRESS);
		}

		let Some(status) = status else {
			return GateDecision::disabled(STATUS_UNAVAILABLE);
		};

		if let Some(rule) = self.rules.iter().find(|r| (r.blocks)(status, input)) {
			return GateDecision::disabled(rule.reason);
		}

		if self.amount_based && input.is_zero() {
			return GateDecision::idle();
		}

		GateDecision::enabled()
	}

	/// Like [`Gate::evaluate`] but as a `Result` for the submission path.
	pub fn check(
		&self,
		status: Option<&S>,
		pending: &PendingAction,
		input: U256,
	) -> Result<(), Error> {
		let decision = self.evaluate(status, pending, input);
		if decision.enabled {
			Ok(())
		} else {
			Err(Error::Gated {
				action: self.action,
				reason: decision.reason.unwrap_or("no amount entered"),
			})
		}
	}
}
