//! The dashboard views.
//!
//! Each view pairs a [`View`] definition (read calls and projection) with the
//! [`Gate`]s of its actions. [`Session`] wires one view to a polling
//! [`Synchronizer`] and a [`Submitter`]; the view types in this module are
//! thin wrappers around a session that add the view specific actions and
//! inputs.

use {
	crate::{
		Error,
		chain::{ChainClient, WriteCall},
		gate::{Gate, GateDecision},
		sync::{ProjectionError, Snapshot, Synchronizer, View, When},
		tx::{AmountInput, Notice, PendingAction, Submitter},
	},
	alloy::primitives::{TxHash, U256},
	core::time::Duration,
	std::sync::Arc,
	tokio::sync::{broadcast, watch},
};

mod account;
mod emitter;
mod faucet;
mod staking;

pub use {
	account::{Account, AccountStatus, AccountView, Connection},
	emitter::{Emitter, EmitterStatus, EmitterView},
	faucet::{Faucet, FaucetStatus, FaucetView},
	staking::{Staking, StakingStatus, StakingView},
};

/// A view together with its polling task and transaction submitter.
pub struct Session<V: View, C: ChainClient> {
	client: Arc<C>,
	sync: Synchronizer<V>,
	submitter: Submitter<C>,
}

impl<V: View, C: ChainClient> Session<V, C> {
	pub fn new(client: Arc<C>, view: V, poll_interval: Duration) -> Self {
		let sync = Synchronizer::spawn(Arc::clone(&client), view, poll_interval);
		let submitter = Submitter::new(Arc::clone(&client), sync.refresher());

		Self {
			client,
			sync,
			submitter,
		}
	}

	#[must_use]
	pub fn with_success_label(mut self, label: &'static str) -> Self {
		self.submitter = self.submitter.with_success_label(label);
		self
	}
}

// Public API
impl<V: View, C: ChainClient> Session<V, C> {
	pub fn client(&self) -> &Arc<C> {
		&self.client
	}

	pub const fn sync(&self) -> &Synchronizer<V> {
		&self.sync
	}

	pub fn snapshot(&self) -> Snapshot<V::Status> {
		self.sync.snapshot()
	}

	pub fn status(&self) -> Option<V::Status> {
		self.sync.status()
	}

	pub fn when(&self) -> When<V::Status> {
		self.sync.when()
	}

	pub fn subscribe(&self) -> watch::Receiver<Snapshot<V::Status>> {
		self.sync.subscribe()
	}

	pub fn refresh(&self) {
		self.sync.refresh();
	}

	pub fn pending(&self) -> PendingAction {
		self.submitter.pending()
	}

	pub fn subscribe_pending(&self) -> watch::Receiver<PendingAction> {
		self.submitter.subscribe()
	}

	pub fn notices(&self) -> broadcast::Receiver<Notice> {
		self.submitter.notices()
	}

	/// Evaluates `gate` against the latest status and pending action.
	pub fn evaluate(&self, gate: &Gate<V::Status>, input: U256) -> GateDecision {
		gate.evaluate(self.sync.snapshot().status(), &self.pending(), input)
	}

	/// Checks `gate` and submits `call` if it is enabled.
	pub async fn act(
		&self,
		gate: &Gate<V::Status>,
		input: U256,
		call: WriteCall,
		clears: Vec<AmountInput>,
	) -> Result<TxHash, Error> {
		gate.check(self.sync.snapshot().status(), &self.pending(), input)?;
		Ok(self.submitter.submit(gate.action(), call, clears).await?)
	}
}

/// Converts an on-chain integer into `u64`.
fn to_u64(field: &'static str, value: U256) -> Result<u64, ProjectionError> {
	u64::try_from(value).map_err(|_| ProjectionError::OutOfRange { field })
}
