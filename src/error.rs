use crate::{
	chain::{NetworkError, TransactionError},
	sync::SyncError,
	units::ParseError,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{action} is not permitted: {reason}")]
	Gated {
		action: &'static str,
		reason: &'static str,
	},

	#[error("no account connected")]
	NotConnected,

	#[error("invalid amount: {0}")]
	Parse(#[from] ParseError),

	#[error(transparent)]
	Sync(#[from] SyncError),

	#[error(transparent)]
	Transaction(#[from] TransactionError),

	#[error(transparent)]
	Network(#[from] NetworkError),
}
