//! Write call submission and lifecycle tracking.
//!
//! Each view owns one [`Submitter`] and therefore has at most one action in
//! flight. The lifecycle of that action is published as a [`PendingAction`]:
//!
//! ```text
//! Idle | Failed -> Sending -> Submitted -> Confirmed -> (refreshed) -> Idle
//!                     \           \
//!                      +-----------+-> Failed
//! ```
//!
//! Settlement in either direction requests exactly one immediate refresh of
//! the view. Inputs are only cleared on success.

use {
	crate::{
		chain::{ChainClient, Receipt, WriteCall},
		sync::Refresher,
	},
	alloy::primitives::TxHash,
	std::sync::Arc,
	tokio::sync::{broadcast, watch},
	tokio_util::sync::{CancellationToken, DropGuard},
};

mod input;

pub use {crate::chain::TransactionError, input::AmountInput};

/// Capacity of the notices channel. Slow observers lose the oldest notices.
const NOTICES_CAPACITY: usize = 32;

/// The single in-flight write call of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingAction {
	#[default]
	Idle,

	/// Handed to the client, no transaction hash yet.
	Sending,

	/// Broadcast and waiting to be mined.
	Submitted { tx: TxHash },

	/// Mined successfully, waiting for the status refresh that reflects it.
	Confirmed { tx: TxHash },

	/// Rejected by the client or reverted on chain.
	Failed { error: TransactionError },
}

impl PendingAction {
	/// Whether a new submission must be refused.
	pub const fn is_in_progress(&self) -> bool {
		matches!(
			self,
			Self::Sending | Self::Submitted { .. } | Self::Confirmed { .. }
		)
	}

	pub const fn tx(&self) -> Option<TxHash> {
		match self {
			Self::Submitted { tx } | Self::Confirmed { tx } => Some(*tx),
			_ => None,
		}
	}
}

/// A one-line message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
	Success { message: String, tx: TxHash },
	Error { message: String },
}

/// Submits write calls for one view and tracks their lifecycle.
pub struct Submitter<C: ChainClient> {
	client: Arc<C>,
	refresher: Refresher,
	pending: Arc<watch::Sender<PendingAction>>,
	notices: broadcast::Sender<Notice>,
	success_label: &'static str,
	cancel: CancellationToken,
	_abort: DropGuard,
}

impl<C: ChainClient> Submitter<C> {
	pub fn new(client: Arc<C>, refresher: Refresher) -> Self {
		let (notices, _) = broadcast::channel(NOTICES_CAPACITY);
		let cancel = CancellationToken::new();

		Self {
			client,
			refresher,
			pending: Arc::new(watch::Sender::new(PendingAction::Idle)),
			notices,
			success_label: "Success",
			cancel: cancel.clone(),
			_abort: cancel.drop_guard(),
		}
	}

	/// Overrides the prefix of success notices, e.g. `"Claim successful"`.
	#[must_use]
	pub fn with_success_label(mut self, label: &'static str) -> Self {
		self.success_label = label;
		self
	}
}

// Public API
impl<C: ChainClient> Submitter<C> {
	pub fn pending(&self) -> PendingAction {
		self.pending.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<PendingAction> {
		self.pending.subscribe()
	}

	pub fn notices(&self) -> broadcast::Receiver<Notice> {
		self.notices.subscribe()
	}

	/// Submits `call` unless another action is in flight.
	///
	/// Returns once the client has accepted the call; confirmation is awaited
	/// in the background. On success the `clears` inputs are reset to zero.
	pub async fn submit(
		&self,
		action: &'static str,
		call: WriteCall,
		clears: Vec<AmountInput>,
	) -> Result<TxHash, TransactionError> {
		let claimed = self.pending.send_if_modified(|pending| {
			if pending.is_in_progress() {
				false
			} else {
				*pending = PendingAction::Sending;
				true
			}
		});

		if !claimed {
			return Err(TransactionError::InProgress);
		}

		tracing::info!(action, call = %call, "submitting transaction");

		let tx = match self.client.send(&call).await {
			Ok(tx) => tx,
			Err(error) => {
				settle_failed(&self.pending, &self.notices, action, error.clone());
				self.refresher.request();
				return Err(error);
			}
		};

		self.pending.send_replace(PendingAction::Submitted { tx });
		tracing::info!(action, %tx, "transaction submitted");

		let settlement = Settlement {
			action,
			tx,
			clears,
			client: Arc::clone(&self.client),
			refresher: self.refresher.clone(),
			pending: Arc::clone(&self.pending),
			notices: self.notices.clone(),
			success_label: self.success_label,
		};

		let cancel = self.cancel.clone();
		tokio::spawn(async move {
			tokio::select! {
				() = cancel.cancelled() => {
					tracing::debug!(action, %tx, "view closed before settlement");
				}
				() = settlement.run() => {}
			}
		});

		Ok(tx)
	}
}

/// Background wait for one submitted transaction.
struct Settlement<C: ChainClient> {
	action: &'static str,
	tx: TxHash,
	clears: Vec<AmountInput>,
	client: Arc<C>,
	refresher: Refresher,
	pending: Arc<watch::Sender<PendingAction>>,
	notices: broadcast::Sender<Notice>,
	success_label: &'static str,
}

impl<C: ChainClient> Settlement<C> {
	async fn run(self) {
		let outcome = match self.client.confirmation(self.tx).await {
			Ok(Receipt { success: true, .. }) => Ok(()),
			Ok(_) => Err(TransactionError::Reverted(self.tx)),
			Err(error) => Err(error),
		};

		let Err(error) = outcome else {
			return self.confirmed().await;
		};

		settle_failed(&self.pending, &self.notices, self.action, error);
		self.refresher.request();
	}

	async fn confirmed(self) {
		let tx = self.tx;
		self.pending.send_replace(PendingAction::Confirmed { tx });

		for input in &self.clears {
			input.clear();
		}

		tracing::info!(action = self.action, %tx, "transaction confirmed");
		let _ = self.notices.send(Notice::Success {
			message: format!("{}, tx: {tx}", self.success_label),
			tx,
		});

		// the action stays in progress until the view reflects it
		self.refresher.refresh().await;

		self.pending.send_if_modified(|pending| {
			if *pending == (PendingAction::Confirmed { tx }) {
				*pending = PendingAction::Idle;
				true
			} else {
				false
			}
		});
	}
}

fn settle_failed(
	pending: &watch::Sender<PendingAction>,
	notices: &broadcast::Sender<Notice>,
	action: &'static str,
	error: TransactionError,
) {
	tracing::warn!(action, %error, "transaction failed");
	let _ = notices.send(Notice::Error {
		message: error.to_string(),
	});
	pending.send_replace(PendingAction::Failed { error });
}
