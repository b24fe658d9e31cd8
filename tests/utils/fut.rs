use core::{
	pin::Pin,
	task::{Context, Poll, Waker},
};

/// Polls a future exactly once without a runtime waker.
pub fn poll_once<T, F>(f: &mut F) -> Poll<T>
where
	F: Future<Output = T> + Unpin,
{
	let waker = Waker::noop();
	let mut context = Context::from_waker(waker);
	Pin::new(f).poll(&mut context)
}
