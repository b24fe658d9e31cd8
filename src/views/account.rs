use {
	super::Session,
	crate::{
		Error,
		chain::{BatchResult, ChainClient, ReadBatch, abi::IToken},
		config::{Chain, Config},
		primitives::Truncated,
		sync::{ProjectionError, View},
		units::compact,
	},
	alloy::primitives::{Address, U256},
	core::fmt,
	derive_more::Deref,
	std::sync::Arc,
};

/// Token holdings of the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
	pub decimals: u8,
	pub symbol: String,
	pub balance: U256,
}

impl AccountStatus {
	/// Compact balance, e.g. `"1.2K SIFA"`. `None` for an empty wallet.
	pub fn balance_line(&self) -> Option<String> {
		(!self.balance.is_zero()).then(|| {
			format!("{} {}", compact(self.balance, self.decimals), self.symbol)
		})
	}
}

#[derive(Debug, Clone)]
pub struct AccountView {
	pub token: Address,
	pub account: Address,
}

impl View for AccountView {
	type Status = AccountStatus;

	const NAME: &'static str = "account";

	fn reads(&self) -> ReadBatch {
		ReadBatch::new()
			.with("decimals", self.token, IToken::decimalsCall {})
			.with("symbol", self.token, IToken::symbolCall {})
			.with("balance", self.token, IToken::balanceOfCall {
				account: self.account,
			})
	}

	fn project(
		&self,
		batch: &BatchResult,
	) -> Result<AccountStatus, ProjectionError> {
		Ok(AccountStatus {
			decimals: batch.decode::<IToken::decimalsCall>("decimals")?,
			symbol: batch.decode::<IToken::symbolCall>("symbol")?,
			balance: batch.decode::<IToken::balanceOfCall>("balance")?,
		})
	}
}

/// State of the connection badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
	/// The node is on the configured chain.
	Connected(Chain),

	/// The node is on another chain than the configured one.
	WrongChain { expected: Chain, found: u64 },
}

impl Connection {
	pub const fn is_connected(&self) -> bool {
		matches!(self, Self::Connected(_))
	}
}

impl fmt::Display for Connection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Connected(chain) => write!(f, "connected to {chain}"),
			Self::WrongChain { expected, found } => match Chain::from_id(*found) {
				Some(found) => {
					write!(f, "disconnected: on {found}, expected {expected}")
				}
				None => write!(f, "disconnected: on chain {found}, expected {expected}"),
			},
		}
	}
}

/// The connected account widget: address, balance and chain badge.
#[derive(Deref)]
pub struct Account<C: ChainClient> {
	#[deref]
	session: Session<AccountView, C>,
	address: Address,
	expected: Chain,
}

impl<C: ChainClient> Account<C> {
	pub fn new(client: Arc<C>, config: &Config) -> Result<Self, Error> {
		let address = client.account().ok_or(Error::NotConnected)?;
		let view = AccountView {
			token: config.contracts.token,
			account: address,
		};

		Ok(Self {
			session: Session::new(client, view, config.poll_interval),
			address,
			expected: config.chain,
		})
	}
}

// Public API
impl<C: ChainClient> Account<C> {
	pub const fn address(&self) -> Address {
		self.address
	}

	/// Shortened address for narrow displays, e.g. `0x12…345`.
	pub fn short_address(&self) -> String {
		Truncated::<2, 3>(self.address).to_string()
	}

	pub fn balance_line(&self) -> Option<String> {
		self.session.status()?.balance_line()
	}

	/// Compares the chain reported by the node with the configured one.
	pub async fn connection(&self) -> Result<Connection, Error> {
		let found = self.session.client().chain_id().await?;
		let connection = if found == self.expected.id() {
			Connection::Connected(self.expected)
		} else {
			Connection::WrongChain {
				expected: self.expected,
				found,
			}
		};

		tracing::debug!(%connection, "checked chain");
		Ok(connection)
	}
}
