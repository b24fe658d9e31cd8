use {
	super::{
		CallError,
		CallOutcome,
		ChainClient,
		NetworkError,
		ReadBatch,
		Receipt,
		TransactionError,
		WriteCall,
	},
	alloy::primitives::{Address, B256, Bytes, TxHash, U64},
	core::time::Duration,
	jsonrpsee::{
		core::{
			client::{ClientT, Error as ClientError},
			params::BatchRequestBuilder,
		},
		http_client::{HttpClient, HttpClientBuilder},
		rpc_params,
	},
	serde::Deserialize,
	serde_json::json,
};

/// [`ChainClient`] backed by a JSON-RPC HTTP endpoint.
///
/// Writes are sent with `eth_sendTransaction`, so the configured account must
/// be managed by the node (e.g. a local development node or a signing
/// proxy).
pub struct RpcClient {
	client: HttpClient,
	account: Option<Address>,
	receipt_poll_interval: Duration,
}

impl RpcClient {
	pub fn new(
		url: impl AsRef<str>,
		account: Option<Address>,
		receipt_poll_interval: Duration,
	) -> Result<Self, NetworkError> {
		let client = HttpClientBuilder::default()
			.build(url)
			.map_err(|e| NetworkError::Unreachable(e.to_string()))?;

		Ok(Self {
			client,
			account,
			receipt_poll_interval,
		})
	}
}

impl ChainClient for RpcClient {
	fn account(&self) -> Option<Address> {
		self.account
	}

	async fn chain_id(&self) -> Result<u64, NetworkError> {
		let id: U64 = self
			.client
			.request("eth_chainId", rpc_params![])
			.await
			.map_err(transport_error)?;
		Ok(id.to::<u64>())
	}

	async fn read(
		&self,
		batch: &ReadBatch,
	) -> Result<Vec<CallOutcome>, NetworkError> {
		if batch.is_empty() {
			return Ok(Vec::new());
		}

		let mut request = BatchRequestBuilder::new();
		for call in batch.calls() {
			let mut tx = json!({ "to": call.to, "data": call.input });
			if let Some(from) = self.account {
				tx["from"] = json!(from);
			}

			request
				.insert("eth_call", rpc_params![tx, "latest"])
				.map_err(|e| NetworkError::Unreachable(e.to_string()))?;
		}

		let response = self
			.client
			.batch_request::<Bytes>(request)
			.await
			.map_err(transport_error)?;

		let outcomes: Vec<CallOutcome> = response
			.into_iter()
			.map(|entry| {
				entry.map_err(|error| {
					if error.code() == EXECUTION_REVERTED {
						CallError::Reverted(error.message().to_string())
					} else {
						CallError::Rpc {
							code: error.code(),
							message: error.message().to_string(),
						}
					}
				})
			})
			.collect();

		tracing::trace!(
			calls = batch.len(),
			failed = outcomes.iter().filter(|o| o.is_err()).count(),
			"eth_call batch completed"
		);

		Ok(outcomes)
	}

	async fn send(&self, call: &WriteCall) -> Result<TxHash, TransactionError> {
		let from = self.account.ok_or(TransactionError::NoAccount)?;
		let tx = json!({
			"from": from,
			"to": call.to,
			"data": call.input,
			"value": call.value,
		});

		self
			.client
			.request("eth_sendTransaction", rpc_params![tx])
			.await
			.map_err(|e| match e {
				ClientError::Call(error) => {
					TransactionError::Rejected(error.message().to_string())
				}
				other => TransactionError::Network(transport_error(other)),
			})
	}

	/// Polls for the receipt until the node returns one.
	///
	/// Transport failures are retried, the transaction may still be mined
	/// while the node is unreachable. An error answer from the node ends the
	/// wait.
	async fn confirmation(&self, tx: TxHash) -> Result<Receipt, TransactionError> {
		loop {
			let response: Result<Option<RpcReceipt>, _> = self
				.client
				.request("eth_getTransactionReceipt", rpc_params![tx])
				.await;

			match response {
				Ok(Some(receipt)) => {
					return Ok(Receipt {
						tx_hash: receipt.transaction_hash,
						block_number: receipt.block_number.to::<u64>(),
						success: receipt.status == U64::from(1),
					});
				}
				Ok(None) => {}
				Err(ClientError::Call(error)) => {
					return Err(TransactionError::Network(NetworkError::Unreachable(
						format!("receipt of {tx}: {}", error.message()),
					)));
				}
				Err(error) => {
					tracing::warn!(%tx, %error, "receipt poll failed, retrying");
				}
			}

			tokio::time::sleep(self.receipt_poll_interval).await;
		}
	}
}

/// JSON-RPC error code used by nodes for reverted `eth_call`s.
const EXECUTION_REVERTED: i32 = 3;

fn transport_error(error: ClientError) -> NetworkError {
	NetworkError::Unreachable(error.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
	transaction_hash: B256,
	block_number: U64,
	status: U64,
}
