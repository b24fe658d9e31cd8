use {
	super::{Session, to_u64},
	crate::{
		Error,
		chain::{
			BatchResult,
			ChainClient,
			ReadBatch,
			WriteCall,
			abi::{IFaucet, IToken},
		},
		config::Config,
		gate::{Gate, GateDecision, Rule},
		primitives::{Hours, UnixTime},
		sync::{ProjectionError, View},
		units::{ether, to_display},
	},
	alloy::primitives::{Address, TxHash, U256},
	core::time::Duration,
	derive_more::Deref,
	std::sync::Arc,
};

const CLAIM_RULES: [Rule<FaucetStatus>; 1] =
	[Rule::new("not yet eligible", |s, _| !s.available)];

pub static CLAIM: Gate<FaucetStatus> = Gate::new("claim", &CLAIM_RULES);

/// Faucet state as seen by the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaucetStatus {
	pub available: bool,
	/// Unix seconds, zero when the account never claimed.
	pub next_claim_at: u64,
	pub decimals: u8,
	/// Tokens left in the faucet.
	pub balance: U256,
	pub drop_amount: U256,
	pub delay: Duration,
	/// Minimum ETH balance, in wei, an account must hold to claim.
	pub require_eth: U256,
}

impl FaucetStatus {
	pub fn lines(&self, symbol: &str) -> Vec<String> {
		vec![
			format!(
				"Balance available: {} {symbol}",
				to_display(self.balance, self.decimals)
			),
			format!(
				"Claim amount: {} {symbol}",
				to_display(self.drop_amount, self.decimals)
			),
			format!("Claim delay: {}", Hours(self.delay)),
			format!("ETH hold required for claim: {}", ether(self.require_eth)),
		]
	}

	/// Cooldown message shown while the account is not eligible.
	pub fn wait_message(&self, now: u64) -> Option<String> {
		if self.available || self.next_claim_at == 0 {
			return None;
		}

		let remaining =
			Duration::from_secs(self.next_claim_at.saturating_sub(now));

		Some(format!(
			"Please wait until {} for the next claim. ({} left)",
			UnixTime(self.next_claim_at),
			humantime::format_duration(remaining)
		))
	}
}

#[derive(Debug, Clone)]
pub struct FaucetView {
	pub faucet: Address,
	pub token: Address,
	/// Eligibility is queried for this account. `Address::ZERO` when none is
	/// connected.
	pub account: Address,
}

impl View for FaucetView {
	type Status = FaucetStatus;

	const NAME: &'static str = "faucet";

	fn reads(&self) -> ReadBatch {
		ReadBatch::new()
			.with("available", self.faucet, IFaucet::availableCall {
				account: self.account,
			})
			.with("next_claim_at", self.faucet, IFaucet::nextClaimAtCall {
				account: self.account,
			})
			.with("decimals", self.token, IToken::decimalsCall {})
			.with("balance", self.token, IToken::balanceOfCall {
				account: self.faucet,
			})
			.with("drop_amount", self.faucet, IFaucet::DROP_AMOUNTCall {})
			.with("delay", self.faucet, IFaucet::DELAYCall {})
			.with("require_eth", self.faucet, IFaucet::REQUIRE_ETHCall {})
	}

	fn project(
		&self,
		batch: &BatchResult,
	) -> Result<FaucetStatus, ProjectionError> {
		let next_claim_at =
			batch.decode::<IFaucet::nextClaimAtCall>("next_claim_at")?;
		let delay = batch.decode::<IFaucet::DELAYCall>("delay")?;

		Ok(FaucetStatus {
			available: batch.decode::<IFaucet::availableCall>("available")?,
			next_claim_at: to_u64("next_claim_at", next_claim_at)?,
			decimals: batch.decode::<IToken::decimalsCall>("decimals")?,
			balance: batch.decode::<IToken::balanceOfCall>("balance")?,
			drop_amount: batch.decode::<IFaucet::DROP_AMOUNTCall>("drop_amount")?,
			delay: Duration::from_secs(to_u64("delay", delay)?),
			require_eth: batch.decode::<IFaucet::REQUIRE_ETHCall>("require_eth")?,
		})
	}
}

/// The faucet panel: status of the faucet and the claim action.
#[derive(Deref)]
pub struct Faucet<C: ChainClient> {
	#[deref]
	session: Session<FaucetView, C>,
	symbol: String,
}

impl<C: ChainClient> Faucet<C> {
	pub fn new(client: Arc<C>, config: &Config) -> Self {
		let view = FaucetView {
			faucet: config.contracts.faucet,
			token: config.contracts.token,
			account: client.account().unwrap_or(Address::ZERO),
		};

		Self {
			session: Session::new(client, view, config.poll_interval)
				.with_success_label("Claim successful"),
			symbol: config.symbol.clone(),
		}
	}
}

// Public API
impl<C: ChainClient> Faucet<C> {
	pub fn symbol(&self) -> &str {
		&self.symbol
	}

	pub fn claim_gate(&self) -> GateDecision {
		self.session.evaluate(&CLAIM, U256::ZERO)
	}

	/// Claims one drop for the connected account.
	pub async fn claim(&self) -> Result<TxHash, Error> {
		let account = self.session.client().account().ok_or(Error::NotConnected)?;
		let call = WriteCall::new(self.session.sync().view().faucet, &IFaucet::dropCall {
			to: account,
		});

		tracing::info!(%account, "claim attempt");
		let result = self.session.act(&CLAIM, U256::ZERO, call, vec![]).await;
		match &result {
			Ok(tx) => tracing::info!(%tx, "claim submitted"),
			Err(error) => tracing::info!(%error, "claim failed"),
		}
		result
	}

	/// Display lines of the latest status, empty before the first refresh.
	pub fn lines(&self) -> Vec<String> {
		self
			.session
			.status()
			.map(|status| status.lines(&self.symbol))
			.unwrap_or_default()
	}
}
