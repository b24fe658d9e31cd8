use {
	super::{Snapshot, SyncError, View},
	crate::chain::ChainClient,
	core::time::Duration,
	std::sync::Arc,
	tokio::{
		sync::{Notify, watch},
		time::MissedTickBehavior,
	},
	tokio_util::sync::CancellationToken,
};

/// Cycle bookkeeping shared with [`super::Refresher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Progress {
	/// Number of completed cycles.
	pub completed: u64,

	/// Whether a read batch is currently in flight.
	pub running: bool,
}

/// Polling task of one view.
pub(super) struct SyncWorker<V: View, C: ChainClient> {
	pub client: Arc<C>,
	pub view: Arc<V>,
	pub period: Duration,

	/// Out-of-band refresh requests. A stored permit survives a running cycle,
	/// so requests made meanwhile result in exactly one follow-up cycle.
	pub notify: Arc<Notify>,

	pub snapshot: watch::Sender<Snapshot<V::Status>>,
	pub progress: watch::Sender<Progress>,

	/// Triggered when the owning synchronizer is dropped or shut down.
	pub cancel: CancellationToken,
}

impl<V: View, C: ChainClient> SyncWorker<V, C> {
	pub async fn run(self) {
		let mut ticker = tokio::time::interval(self.period);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		tracing::debug!(
			view = V::NAME,
			period = %humantime::format_duration(self.period),
			"status synchronizer started"
		);

		loop {
			tokio::select! {
				biased;

				() = self.cancel.cancelled() => break,

				_ = ticker.tick() => {}

				() = self.notify.notified() => {
					// the periodic schedule restarts after an out-of-band cycle
					ticker.reset();
				}
			}

			if !self.cycle().await {
				break;
			}
		}

		tracing::debug!(view = V::NAME, "status synchronizer stopped");
	}

	/// Runs one serialized read-project-publish cycle.
	///
	/// Returns `false` when the synchronizer was cancelled meanwhile.
	async fn cycle(&self) -> bool {
		let batch = self.view.reads();
		self.progress.send_modify(|p| p.running = true);

		let outcome = tokio::select! {
			biased;

			() = self.cancel.cancelled() => {
				tracing::trace!(view = V::NAME, "abandoning in-flight read batch");
				return false;
			}

			outcome = self.client.read(&batch) => outcome,
		};

		// a response that raced with teardown is dropped unseen
		if self.cancel.is_cancelled() {
			return false;
		}

		let outcome = outcome
			.and_then(|outcomes| batch.complete(outcomes))
			.map_err(SyncError::from)
			.and_then(|result| self.view.project(&result).map_err(SyncError::from));

		match &outcome {
			Ok(_) => tracing::debug!(
				view = V::NAME,
				generation = self.snapshot.borrow().generation() + 1,
				"status refreshed"
			),
			Err(error) => tracing::warn!(
				view = V::NAME,
				%error,
				"refresh failed, keeping previous status"
			),
		}

		self.snapshot.send_modify(|snapshot| snapshot.apply(outcome));
		self.progress.send_modify(|p| {
			p.running = false;
			p.completed += 1;
		});

		true
	}
}
