//! Boundary with the blockchain node.
//!
//! The rest of the crate only talks to the chain through [`ChainClient`]:
//! batched read calls, write submission, confirmation and the identity of the
//! connected account. [`RpcClient`] implements it over JSON-RPC.

use {
	crate::sync::{ProjectionError, SyncError},
	alloy::{
		primitives::{Address, Bytes, TxHash, U256},
		sol_types::SolCall,
	},
	core::fmt,
};

pub mod abi;
mod error;
mod rpc;

pub use {
	error::{CallError, NetworkError, TransactionError},
	rpc::RpcClient,
};

/// Result of one call inside a read batch.
pub type CallOutcome = Result<Bytes, CallError>;

/// Capability exposed by a connected network client.
///
/// Implementations are shared between views and must tolerate concurrent
/// calls. Reads never mutate chain state.
pub trait ChainClient: Send + Sync + 'static {
	/// The currently connected account, if any.
	fn account(&self) -> Option<Address>;

	/// The chain identifier reported by the node.
	fn chain_id(&self) -> impl Future<Output = Result<u64, NetworkError>> + Send;

	/// Executes all calls of the batch as one logical unit.
	///
	/// On success the returned outcomes are in the same order as
	/// [`ReadBatch::calls`]. A failing call yields a [`CallError`] in its
	/// position, a failing batch yields [`NetworkError`].
	fn read(
		&self,
		batch: &ReadBatch,
	) -> impl Future<Output = Result<Vec<CallOutcome>, NetworkError>> + Send;

	/// Submits a state-changing call and returns its transaction hash.
	fn send(
		&self,
		call: &WriteCall,
	) -> impl Future<Output = Result<TxHash, TransactionError>> + Send;

	/// Resolves once the transaction is mined.
	///
	/// There is no local timeout, the lifecycle is bounded by the client's
	/// own confirmation semantics.
	fn confirmation(
		&self,
		tx: TxHash,
	) -> impl Future<Output = Result<Receipt, TransactionError>> + Send;
}

/// A single named read call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCall {
	/// Name of the status field this call feeds.
	pub field: &'static str,
	/// Contract address.
	pub to: Address,
	/// Solidity signature of the called function, for logs and errors.
	pub signature: &'static str,
	/// ABI encoded calldata.
	pub input: Bytes,
}

/// An ordered group of read calls issued together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadBatch {
	calls: Vec<ReadCall>,
}

impl ReadBatch {
	pub const fn new() -> Self {
		Self { calls: Vec::new() }
	}

	/// Appends a typed call whose result is addressed as `field`.
	#[must_use]
	pub fn with<C: SolCall>(
		mut self,
		field: &'static str,
		to: Address,
		call: C,
	) -> Self {
		debug_assert!(
			self.calls.iter().all(|c| c.field != field),
			"duplicate batch field {field}"
		);

		self.calls.push(ReadCall {
			field,
			to,
			signature: C::SIGNATURE,
			input: call.abi_encode().into(),
		});
		self
	}

	pub fn calls(&self) -> &[ReadCall] {
		&self.calls
	}

	pub fn len(&self) -> usize {
		self.calls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.calls.is_empty()
	}

	/// Pairs client outcomes with the field names of this batch.
	pub fn complete(
		&self,
		outcomes: Vec<CallOutcome>,
	) -> Result<BatchResult, NetworkError> {
		if outcomes.len() != self.calls.len() {
			return Err(NetworkError::MalformedBatch {
				expected: self.calls.len(),
				found: outcomes.len(),
			});
		}

		Ok(BatchResult {
			entries: self
				.calls
				.iter()
				.map(|call| call.field)
				.zip(outcomes)
				.collect(),
		})
	}
}

/// Outcomes of one completed read batch, addressed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
	entries: Vec<(&'static str, CallOutcome)>,
}

impl BatchResult {
	/// Raw outcome of the call registered as `field`.
	pub fn outcome(&self, field: &str) -> Option<&CallOutcome> {
		self
			.entries
			.iter()
			.find(|(name, _)| *name == field)
			.map(|(_, outcome)| outcome)
	}

	/// Decodes the return value of the call registered as `field`.
	///
	/// Failed or missing calls are reported as [`ProjectionError`] rather than
	/// replaced by a default value.
	pub fn decode<C: SolCall>(
		&self,
		field: &'static str,
	) -> Result<C::Return, ProjectionError> {
		let data = self
			.outcome(field)
			.ok_or(ProjectionError::Missing { field })?
			.as_ref()
			.map_err(|error| ProjectionError::CallFailed {
				field,
				error: error.clone(),
			})?;

		C::abi_decode_returns(data).map_err(|e| ProjectionError::Decode {
			field,
			reason: e.to_string(),
		})
	}
}

/// A state-changing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
	pub to: Address,
	pub signature: &'static str,
	pub input: Bytes,
	pub value: U256,
}

impl WriteCall {
	pub fn new<C: SolCall>(to: Address, call: &C) -> Self {
		Self {
			to,
			signature: C::SIGNATURE,
			input: call.abi_encode().into(),
			value: U256::ZERO,
		}
	}
}

impl fmt::Display for WriteCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.signature, self.to)
	}
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
	pub tx_hash: TxHash,
	pub block_number: u64,
	pub success: bool,
}

/// Reads a single value outside of the polling loop, e.g. for previews.
pub async fn read_one<C, S>(
	client: &C,
	to: Address,
	call: S,
) -> Result<S::Return, SyncError>
where
	C: ChainClient,
	S: SolCall,
{
	const FIELD: &str = "value";
	let batch = ReadBatch::new().with(FIELD, to, call);
	let outcomes = client.read(&batch).await?;
	Ok(batch.complete(outcomes)?.decode::<S>(FIELD)?)
}
