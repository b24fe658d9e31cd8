use crate::chain::{CallError, NetworkError};

/// A required field could not be taken from an otherwise successful batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
	#[error("field `{field}` is missing from the batch")]
	Missing { field: &'static str },

	#[error("field `{field}` failed: {error}")]
	CallFailed {
		field: &'static str,
		error: CallError,
	},

	#[error("field `{field}` could not be decoded: {reason}")]
	Decode { field: &'static str, reason: String },

	#[error("field `{field}` is out of range")]
	OutOfRange { field: &'static str },
}

/// Why the most recent refresh cycle did not produce a fresh status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
	#[error(transparent)]
	Network(#[from] NetworkError),

	#[error(transparent)]
	Projection(#[from] ProjectionError),
}
