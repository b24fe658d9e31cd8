use {
	alloy::{
		primitives::{Address, Bytes, TxHash},
		sol_types::{SolCall, SolValue},
	},
	sifa::chain::{
		CallError,
		CallOutcome,
		ChainClient,
		NetworkError,
		ReadBatch,
		Receipt,
		TransactionError,
		WriteCall,
	},
	std::{
		collections::HashMap,
		sync::{
			Mutex,
			atomic::{AtomicU64, AtomicUsize, Ordering},
		},
	},
	tokio::sync::watch,
};

/// Scriptable in-memory chain.
///
/// Read calls are answered from a table keyed by contract address and
/// calldata. Unknown calls revert. Sent transactions are recorded and stay
/// unconfirmed until [`MockChain::mine`] is called, unless auto mining is on.
pub struct MockChain {
	account: Option<Address>,
	chain_id: u64,
	responses: Mutex<HashMap<(Address, Bytes), CallOutcome>>,
	read_failure: Mutex<Option<NetworkError>>,
	send_failure: Mutex<Option<TransactionError>>,
	reads: AtomicUsize,
	nonce: AtomicU64,
	held: watch::Sender<bool>,
	sent: Mutex<Vec<WriteCall>>,
	receipts: watch::Sender<HashMap<TxHash, bool>>,
	auto_mine: Mutex<Option<bool>>,
}

impl MockChain {
	pub fn new(account: Option<Address>) -> Self {
		Self {
			account,
			chain_id: 42_161,
			responses: Mutex::default(),
			read_failure: Mutex::default(),
			send_failure: Mutex::default(),
			reads: AtomicUsize::new(0),
			nonce: AtomicU64::new(0),
			held: watch::Sender::new(false),
			sent: Mutex::default(),
			receipts: watch::Sender::new(HashMap::new()),
			auto_mine: Mutex::default(),
		}
	}

	#[must_use]
	pub const fn with_chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = chain_id;
		self
	}

	/// Answers `call` on `to` with `value`.
	pub fn respond<C: SolCall, V: SolValue>(&self, to: Address, call: C, value: V) {
		self.set(to, &call, Ok(value.abi_encode().into()));
	}

	/// Makes `call` on `to` revert.
	pub fn revert<C: SolCall>(&self, to: Address, call: C, reason: &str) {
		self.set(to, &call, Err(CallError::Reverted(reason.to_string())));
	}

	/// Fails every following batch as a whole, or stops doing so.
	pub fn fail_reads(&self, error: Option<NetworkError>) {
		*self.read_failure.lock().unwrap() = error;
	}

	/// Rejects every following transaction, or stops doing so.
	pub fn fail_sends(&self, error: Option<TransactionError>) {
		*self.send_failure.lock().unwrap() = error;
	}

	/// While held, read batches do not complete.
	pub fn hold_reads(&self, held: bool) {
		self.held.send_replace(held);
	}

	/// Confirms every following transaction right away with this outcome.
	pub fn auto_mine(&self, success: Option<bool>) {
		*self.auto_mine.lock().unwrap() = success;
	}

	/// Mines a previously sent transaction.
	pub fn mine(&self, tx: TxHash, success: bool) {
		self.receipts.send_modify(|receipts| {
			receipts.insert(tx, success);
		});
	}

	/// Number of read batches that reached the chain.
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn sent(&self) -> Vec<WriteCall> {
		self.sent.lock().unwrap().clone()
	}

	fn set<C: SolCall>(&self, to: Address, call: &C, outcome: CallOutcome) {
		let input = Bytes::from(call.abi_encode());
		self.responses.lock().unwrap().insert((to, input), outcome);
	}
}

impl ChainClient for MockChain {
	fn account(&self) -> Option<Address> {
		self.account
	}

	async fn chain_id(&self) -> Result<u64, NetworkError> {
		Ok(self.chain_id)
	}

	async fn read(
		&self,
		batch: &ReadBatch,
	) -> Result<Vec<CallOutcome>, NetworkError> {
		self.reads.fetch_add(1, Ordering::SeqCst);

		let mut held = self.held.subscribe();
		let _ = held.wait_for(|held| !*held).await;

		if let Some(error) = self.read_failure.lock().unwrap().clone() {
			return Err(error);
		}

		let responses = self.responses.lock().unwrap();
		Ok(batch
			.calls()
			.iter()
			.map(|call| {
				responses
					.get(&(call.to, call.input.clone()))
					.cloned()
					.unwrap_or_else(|| {
						Err(CallError::Reverted(format!("unexpected {}", call.signature)))
					})
			})
			.collect())
	}

	async fn send(&self, call: &WriteCall) -> Result<TxHash, TransactionError> {
		if let Some(error) = self.send_failure.lock().unwrap().clone() {
			return Err(error);
		}

		self.sent.lock().unwrap().push(call.clone());
		let nonce = self.nonce.fetch_add(1, Ordering::SeqCst) + 1;
		let tx = TxHash::with_last_byte(u8::try_from(nonce).unwrap());

		let auto_mine = *self.auto_mine.lock().unwrap();
		if let Some(success) = auto_mine {
			self.mine(tx, success);
		}

		Ok(tx)
	}

	async fn confirmation(&self, tx: TxHash) -> Result<Receipt, TransactionError> {
		let mut receipts = self.receipts.subscribe();
		let success = *receipts
			.wait_for(|receipts| receipts.contains_key(&tx))
			.await
			.map_err(|_| TransactionError::Network(NetworkError::Disconnected))?
			.get(&tx)
			.unwrap();

		Ok(Receipt {
			tx_hash: tx,
			block_number: 1,
			success,
		})
	}
}
