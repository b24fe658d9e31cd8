use {super::Snapshot, tokio::sync::watch};

/// Awaits changes to a view's published snapshots.
///
/// All futures returned here are detached from the `When` instance and can be
/// moved into other tasks. When the synchronizer terminates, futures waiting
/// for a condition that can no longer become true never resolve.
pub struct When<S> {
	snapshot: watch::Receiver<Snapshot<S>>,
}

impl<S> Clone for When<S> {
	fn clone(&self) -> Self {
		Self {
			snapshot: self.snapshot.clone(),
		}
	}
}

impl<S> When<S> {
	pub(crate) const fn new(snapshot: watch::Receiver<Snapshot<S>>) -> Self {
		Self { snapshot }
	}
}

// Public API
impl<S: Send + Sync + 'static> When<S> {
	/// Resolves once the first status has been projected.
	///
	/// Resolves immediately if a status is already available.
	pub fn ready(&self) -> impl Future<Output = ()> + Send + Sync + 'static {
		self.until(|snapshot| snapshot.status().is_some())
	}

	/// Resolves once the status generation reaches at least `generation`.
	pub fn generation(
		&self,
		generation: u64,
	) -> impl Future<Output = ()> + Send + Sync + 'static {
		self.until(move |snapshot| snapshot.generation() >= generation)
	}

	/// Resolves on the next successfully projected status after this call.
	pub fn updated(&self) -> impl Future<Output = ()> + Send + Sync + 'static {
		let next = self.snapshot.borrow().generation() + 1;
		self.generation(next)
	}

	/// Resolves on the next completed cycle after this call, whether it
	/// succeeded or not.
	pub fn cycled(&self) -> impl Future<Output = ()> + Send + Sync + 'static {
		let next = self.snapshot.borrow().cycles() + 1;
		self.cycles(next)
	}

	/// Resolves once at least `cycles` refresh cycles have completed.
	///
	/// Unlike [`When::cycled`] the target is absolute, so cycles completing
	/// between two waits are never missed.
	pub fn cycles(
		&self,
		cycles: u64,
	) -> impl Future<Output = ()> + Send + Sync + 'static {
		self.until(move |snapshot| snapshot.cycles() >= cycles)
	}

	/// Resolves when the most recent cycle has failed.
	pub fn stale(&self) -> impl Future<Output = ()> + Send + Sync + 'static {
		self.until(Snapshot::<S>::is_stale)
	}

	fn until<F>(
		&self,
		predicate: F,
	) -> impl Future<Output = ()> + Send + Sync + 'static
	where
		F: Fn(&Snapshot<S>) -> bool + Send + Sync + 'static,
	{
		let mut snapshot = self.snapshot.clone();

		async move {
			if snapshot.wait_for(|s| predicate(s)).await.is_err() {
				// the synchronizer is gone, the condition can't change anymore
				core::future::pending::<()>().await;
			}
		}
	}
}
