use alloy::primitives::TxHash;

/// The whole read batch could not be executed.
///
/// When this is returned none of the batch positions carry fresh data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
	#[error("client is not connected")]
	Disconnected,

	#[error("chain unreachable: {0}")]
	Unreachable(String),

	#[error("batch returned {found} results, expected {expected}")]
	MalformedBatch { expected: usize, found: usize },
}

/// A single call inside an otherwise successful batch failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
	#[error("execution reverted: {0}")]
	Reverted(String),

	#[error("rpc error {code}: {message}")]
	Rpc { code: i32, message: String },
}

/// A write call was refused by the client or failed on chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
	#[error("another transaction is already in progress")]
	InProgress,

	#[error("no account connected")]
	NoAccount,

	#[error("transaction rejected: {0}")]
	Rejected(String),

	#[error("transaction {0} reverted")]
	Reverted(TxHash),

	#[error(transparent)]
	Network(#[from] NetworkError),
}
