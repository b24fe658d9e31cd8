//! Status synchronization.
//!
//! A [`View`] describes which contract reads make up its status and how to
//! project them into a typed record. A [`Synchronizer`] owns the polling task
//! for one view: it runs the read batch on a fixed period and on demand,
//! projects the result, and publishes [`Snapshot`]s.
//!
//! Notes:
//!
//! - Refresh cycles of one view never overlap. Refresh requests arriving while
//!   a batch is in flight are coalesced into a single follow-up cycle.
//!
//! - A failed cycle keeps the last valid status and records the failure in
//!   [`Snapshot::stale`]. Failed fields are never replaced by defaults.
//!
//! - Dropping the synchronizer stops its task. A batch that is still in flight
//!   at that point is abandoned and its response discarded.

use {
	crate::chain::{BatchResult, ChainClient, ReadBatch},
	chrono::{DateTime, Utc},
	core::{fmt, time::Duration},
	std::sync::Arc,
	tokio::sync::{Notify, watch},
	tokio_util::sync::{CancellationToken, DropGuard},
	worker::{Progress, SyncWorker},
};

mod error;
mod when;
mod worker;

pub use {
	error::{ProjectionError, SyncError},
	when::When,
};

/// Default polling period of status views.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Shortest accepted polling period. Shorter periods are raised to this one.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A group of contract reads and the projection of their results.
pub trait View: Send + Sync + 'static {
	/// The typed status record produced by this view.
	type Status: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

	/// Name used in logs.
	const NAME: &'static str;

	/// The read calls issued on every refresh cycle.
	fn reads(&self) -> ReadBatch;

	/// Maps one completed batch into a status record.
	///
	/// Must be pure: projecting the same batch twice yields equal records.
	fn project(
		&self,
		batch: &BatchResult,
	) -> Result<Self::Status, ProjectionError>;
}

/// The published state of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<S> {
	status: Option<S>,
	generation: u64,
	cycles: u64,
	updated_at: Option<DateTime<Utc>>,
	stale: Option<SyncError>,
}

impl<S> Default for Snapshot<S> {
	fn default() -> Self {
		Self {
			status: None,
			generation: 0,
			cycles: 0,
			updated_at: None,
			stale: None,
		}
	}
}

impl<S> Snapshot<S> {
	/// The status produced by the most recent successful cycle.
	pub const fn status(&self) -> Option<&S> {
		self.status.as_ref()
	}

	/// Number of successfully projected batches.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Number of completed refresh cycles, successful or not.
	pub const fn cycles(&self) -> u64 {
		self.cycles
	}

	/// When the status was last replaced.
	pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
		self.updated_at
	}

	/// The failure of the most recent cycle, if it failed.
	pub const fn stale(&self) -> Option<&SyncError> {
		self.stale.as_ref()
	}

	pub const fn is_stale(&self) -> bool {
		self.stale.is_some()
	}

	/// Folds the outcome of one cycle into the snapshot.
	///
	/// Successful outcomes replace the status wholesale, failures keep the
	/// previous status.
	pub fn apply(&mut self, outcome: Result<S, SyncError>) {
		self.cycles += 1;
		match outcome {
			Ok(status) => {
				self.status = Some(status);
				self.generation += 1;
				self.updated_at = Some(Utc::now());
				self.stale = None;
			}
			Err(error) => {
				self.stale = Some(error);
			}
		}
	}
}

/// Runs one read batch and projects it, without touching any snapshot.
pub async fn fetch<V: View, C: ChainClient>(
	client: &C,
	view: &V,
) -> Result<V::Status, SyncError> {
	let batch = view.reads();
	let outcomes = client.read(&batch).await?;
	let result = batch.complete(outcomes)?;
	Ok(view.project(&result)?)
}

/// Owned polling task of one view.
///
/// The task stops when this handle is dropped.
pub struct Synchronizer<V: View> {
	view: Arc<V>,
	snapshot: watch::Receiver<Snapshot<V::Status>>,
	refresher: Refresher,
	cancel: CancellationToken,
	_abort: DropGuard,
}

impl<V: View> Synchronizer<V> {
	/// Starts polling `view` every `period`. The first cycle runs immediately.
	///
	/// Periods below [`MIN_POLL_INTERVAL`] are raised to it.
	pub fn spawn<C: ChainClient>(
		client: Arc<C>,
		view: V,
		period: Duration,
	) -> Self {
		if period < MIN_POLL_INTERVAL {
			tracing::warn!(
				view = V::NAME,
				requested = ?period,
				"poll interval too short, using {MIN_POLL_INTERVAL:?}"
			);
		}

		let period = period.max(MIN_POLL_INTERVAL);
		let view = Arc::new(view);
		let cancel = CancellationToken::new();
		let notify = Arc::new(Notify::new());
		let (snapshot_tx, snapshot) = watch::channel(Snapshot::default());
		let (progress_tx, progress) = watch::channel(Progress::default());

		let worker = SyncWorker {
			client,
			view: Arc::clone(&view),
			period,
			notify: Arc::clone(&notify),
			snapshot: snapshot_tx,
			progress: progress_tx,
			cancel: cancel.clone(),
		};

		tokio::spawn(worker.run());

		Self {
			view,
			snapshot,
			refresher: Refresher { notify, progress },
			cancel: cancel.clone(),
			_abort: cancel.drop_guard(),
		}
	}
}

// Public API
impl<V: View> Synchronizer<V> {
	pub fn view(&self) -> &V {
		&self.view
	}

	/// A copy of the latest published snapshot.
	pub fn snapshot(&self) -> Snapshot<V::Status> {
		self.snapshot.borrow().clone()
	}

	/// The latest valid status, if any cycle has succeeded yet.
	pub fn status(&self) -> Option<V::Status> {
		self.snapshot.borrow().status().cloned()
	}

	/// Observes every published snapshot.
	pub fn subscribe(&self) -> watch::Receiver<Snapshot<V::Status>> {
		self.snapshot.clone()
	}

	/// Awaitable conditions on this view's snapshots.
	pub fn when(&self) -> When<V::Status> {
		When::new(self.snapshot.clone())
	}

	/// Requests one immediate refresh cycle.
	pub fn refresh(&self) {
		self.refresher.request();
	}

	/// A cloneable handle for requesting refreshes from other tasks.
	pub fn refresher(&self) -> Refresher {
		self.refresher.clone()
	}

	/// Stops the polling task.
	pub fn shutdown(&self) {
		self.cancel.cancel();
	}

	pub fn is_terminated(&self) -> bool {
		self.cancel.is_cancelled()
	}
}

/// Requests out-of-band refresh cycles of one synchronizer.
#[derive(Clone)]
pub struct Refresher {
	notify: Arc<Notify>,
	progress: watch::Receiver<Progress>,
}

impl Refresher {
	/// Requests one immediate cycle without waiting for it.
	pub fn request(&self) {
		self.notify.notify_one();
	}

	/// Requests one immediate cycle and returns a future that resolves once a
	/// cycle issued after this call has completed.
	///
	/// The future also resolves when the synchronizer terminates.
	pub fn refresh(&self) -> impl Future<Output = ()> + Send + 'static {
		let mut progress = self.progress.clone();
		let target = {
			let current = progress.borrow_and_update();
			current.completed + if current.running { 2 } else { 1 }
		};

		self.request();

		async move {
			let _ = progress.wait_for(|p| p.completed >= target).await;
		}
	}
}

impl fmt::Debug for Refresher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Refresher")
			.field("progress", &*self.progress.borrow())
			.finish_non_exhaustive()
	}
}
