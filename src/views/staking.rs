use {
	super::Session,
	crate::{
		Error,
		chain::{
			BatchResult,
			ChainClient,
			ReadBatch,
			WriteCall,
			abi::{IToken, IVault},
			read_one,
		},
		config::Config,
		gate::{Gate, GateDecision, Rule, STATUS_UNAVAILABLE},
		sync::{ProjectionError, View},
		tx::AmountInput,
		units::{compact, from_percent, to_display, to_percent},
	},
	alloy::primitives::{Address, TxHash, U256},
	derive_more::Deref,
	std::sync::Arc,
};

/// Allowance granted by [`Staking::approve`], the largest `int256`.
pub const APPROVE_AMOUNT: U256 =
	U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1]);

/// Share amount the price is read for. The batch is fixed before the token
/// decimals are known, so the result is rescaled in [`per_whole_share`].
const PRICED_SHARES: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

const DEPOSIT_RULES: [Rule<StakingStatus>; 3] = [
	Rule::new("insufficient balance", |s, input| input > s.balance),
	Rule::new("exceeds approved amount", |s, input| input > s.allowance),
	Rule::new("exceeds deposit limit", |s, input| input > s.max_deposit),
];

const REDEEM_RULES: [Rule<StakingStatus>; 1] = [Rule::new(
	"exceeds redeemable shares",
	|s, input| input > s.max_redeem,
)];

pub static APPROVE: Gate<StakingStatus> = Gate::new("approve", &[]);

pub static DEPOSIT: Gate<StakingStatus> =
	Gate::new("deposit", &DEPOSIT_RULES).with_amount();

pub static REDEEM: Gate<StakingStatus> =
	Gate::new("redeem", &REDEEM_RULES).with_amount();

/// Vault position of the connected account.
///
/// Token and share amounts both use the token's `decimals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingStatus {
	pub decimals: u8,
	/// Token balance of the account.
	pub balance: U256,
	/// Tokens the vault may pull from the account.
	pub allowance: U256,
	pub max_deposit: U256,
	pub shares: U256,
	/// Tokens redeemable for one whole share, i.e. `10^decimals` base units.
	pub share_price: U256,
	pub max_redeem: U256,
	pub max_withdraw: U256,
}

impl StakingStatus {
	/// Largest deposit no rule of [`DEPOSIT`] blocks.
	pub fn deposit_limit(&self) -> U256 {
		self.allowance.min(self.balance).min(self.max_deposit)
	}

	pub fn lines(&self, symbol: &str) -> Vec<String> {
		vec![
			format!("Your shares: {}", to_display(self.shares, self.decimals)),
			format!(
				"{symbol} value: {}",
				to_display(self.max_withdraw, self.decimals)
			),
			format!(
				"Share price: {} {symbol}/share",
				to_display(self.share_price, self.decimals)
			),
			format!(
				"Wallet balance: {} {symbol}",
				compact(self.balance, self.decimals)
			),
			format!(
				"Approved for deposit: {} {symbol}",
				compact(self.allowance, self.decimals)
			),
		]
	}
}

#[derive(Debug, Clone)]
pub struct StakingView {
	pub token: Address,
	pub vault: Address,
	pub account: Address,
}

impl View for StakingView {
	type Status = StakingStatus;

	const NAME: &'static str = "staking";

	fn reads(&self) -> ReadBatch {
		let account = self.account;

		ReadBatch::new()
			.with("decimals", self.token, IToken::decimalsCall {})
			.with("balance", self.token, IToken::balanceOfCall { account })
			.with("allowance", self.token, IToken::allowanceCall {
				owner: account,
				spender: self.vault,
			})
			.with("max_deposit", self.vault, IVault::maxDepositCall {
				receiver: account,
			})
			.with("shares", self.vault, IVault::balanceOfCall { account })
			.with("share_price", self.vault, IVault::convertToAssetsCall {
				shares: PRICED_SHARES,
			})
			.with("max_redeem", self.vault, IVault::maxRedeemCall { owner: account })
			.with("max_withdraw", self.vault, IVault::maxWithdrawCall {
				owner: account,
			})
	}

	fn project(
		&self,
		batch: &BatchResult,
	) -> Result<StakingStatus, ProjectionError> {
		let decimals = batch.decode::<IToken::decimalsCall>("decimals")?;
		let priced = batch.decode::<IVault::convertToAssetsCall>("share_price")?;

		Ok(StakingStatus {
			decimals,
			balance: batch.decode::<IToken::balanceOfCall>("balance")?,
			allowance: batch.decode::<IToken::allowanceCall>("allowance")?,
			max_deposit: batch.decode::<IVault::maxDepositCall>("max_deposit")?,
			shares: batch.decode::<IVault::balanceOfCall>("shares")?,
			share_price: per_whole_share(priced, decimals),
			max_redeem: batch.decode::<IVault::maxRedeemCall>("max_redeem")?,
			max_withdraw: batch.decode::<IVault::maxWithdrawCall>("max_withdraw")?,
		})
	}
}

/// Assets of [`PRICED_SHARES`] rescaled to one whole share of `decimals`.
///
/// Vault conversions are linear, so this equals `convertToAssets(10^decimals)`
/// up to rounding, and exactly so for 18 decimals.
fn per_whole_share(assets: U256, decimals: u8) -> U256 {
	let unit = U256::from(10).pow(U256::from(decimals));
	assets.saturating_mul(unit) / PRICED_SHARES
}

/// The staking panel: vault position, deposit and redeem.
#[derive(Deref)]
pub struct Staking<C: ChainClient> {
	#[deref]
	session: Session<StakingView, C>,
	deposit: AmountInput,
	redeem: AmountInput,
	symbol: String,
}

impl<C: ChainClient> Staking<C> {
	pub fn new(client: Arc<C>, config: &Config) -> Self {
		let view = StakingView {
			token: config.contracts.token,
			vault: config.contracts.vault,
			account: client.account().unwrap_or(Address::ZERO),
		};

		Self {
			session: Session::new(client, view, config.poll_interval),
			deposit: AmountInput::new(),
			redeem: AmountInput::new(),
			symbol: config.symbol.clone(),
		}
	}
}

// Public API
impl<C: ChainClient> Staking<C> {
	/// Deposit amount in token base units.
	pub const fn deposit_input(&self) -> &AmountInput {
		&self.deposit
	}

	/// Redeem amount in share base units.
	pub const fn redeem_input(&self) -> &AmountInput {
		&self.redeem
	}

	/// Parses a deposit amount typed by the user.
	pub fn parse_deposit(&self, display: &str) -> Result<U256, Error> {
		let decimals = self
			.session
			.status()
			.map(|status| status.decimals)
			.ok_or(Error::Gated {
				action: DEPOSIT.action(),
				reason: STATUS_UNAVAILABLE,
			})?;

		Ok(self.deposit.parse(display, decimals)?)
	}

	/// Parses a redeem amount typed by the user, in whole shares.
	pub fn parse_redeem(&self, display: &str) -> Result<U256, Error> {
		let decimals = self
			.session
			.status()
			.map(|status| status.decimals)
			.ok_or(Error::Gated {
				action: REDEEM.action(),
				reason: STATUS_UNAVAILABLE,
			})?;

		Ok(self.redeem.parse(display, decimals)?)
	}

	/// Fills the deposit input with the largest permitted amount.
	pub fn fill_max_deposit(&self) -> Option<U256> {
		let max = self.session.status()?.deposit_limit();
		self.deposit.set(max);
		Some(max)
	}

	/// Fills the redeem input with every redeemable share.
	pub fn fill_max_redeem(&self) -> Option<U256> {
		let max = self.session.status()?.max_redeem;
		self.redeem.set(max);
		Some(max)
	}

	/// The redeem input as a share of `max_redeem`. Over-limit inputs report
	/// more than 100.
	pub fn redeem_percent(&self) -> Option<u64> {
		let status = self.session.status()?;
		Some(to_percent(self.redeem.get(), status.max_redeem))
	}

	/// Sets the redeem input from a slider position, clamped to 100%.
	pub fn set_redeem_percent(&self, percent: u64) -> Option<U256> {
		let status = self.session.status()?;
		let amount = from_percent(percent.min(100), status.max_redeem);
		self.redeem.set(amount);
		Some(amount)
	}

	pub fn approve_gate(&self) -> GateDecision {
		self.session.evaluate(&APPROVE, U256::ZERO)
	}

	pub fn deposit_gate(&self) -> GateDecision {
		self.session.evaluate(&DEPOSIT, self.deposit.get())
	}

	pub fn redeem_gate(&self) -> GateDecision {
		self.session.evaluate(&REDEEM, self.redeem.get())
	}

	/// Lets the vault spend the account's tokens.
	pub async fn approve(&self) -> Result<TxHash, Error> {
		let view = self.session.sync().view();
		let call = WriteCall::new(view.token, &IToken::approveCall {
			spender: view.vault,
			amount: APPROVE_AMOUNT,
		});

		tracing::info!("staking approve started");
		self.session.act(&APPROVE, U256::ZERO, call, vec![]).await
	}

	/// Deposits the amount of the deposit input.
	pub async fn deposit(&self) -> Result<TxHash, Error> {
		let account = self.account()?;
		let assets = self.deposit.get();
		let call = WriteCall::new(self.vault(), &IVault::depositCall {
			assets,
			receiver: account,
		});

		tracing::info!(%assets, "staking deposit started");
		self
			.session
			.act(&DEPOSIT, assets, call, vec![self.deposit.clone()])
			.await
	}

	/// Redeems the shares of the redeem input.
	pub async fn redeem(&self) -> Result<TxHash, Error> {
		let account = self.account()?;
		let shares = self.redeem.get();
		let call = WriteCall::new(self.vault(), &IVault::redeemCall {
			shares,
			receiver: account,
			owner: account,
		});

		tracing::info!(%shares, "staking redeem started");
		self
			.session
			.act(&REDEEM, shares, call, vec![self.redeem.clone()])
			.await
	}

	/// Shares the current deposit input would mint.
	pub async fn preview_deposit(&self) -> Result<U256, Error> {
		let assets = self.deposit.get();
		let call = IVault::previewDepositCall { assets };
		Ok(read_one(self.session.client().as_ref(), self.vault(), call).await?)
	}

	/// Tokens the current redeem input would return.
	pub async fn preview_redeem(&self) -> Result<U256, Error> {
		let shares = self.redeem.get();
		let call = IVault::previewRedeemCall { shares };
		Ok(read_one(self.session.client().as_ref(), self.vault(), call).await?)
	}

	pub fn lines(&self) -> Vec<String> {
		self
			.session
			.status()
			.map(|status| status.lines(&self.symbol))
			.unwrap_or_default()
	}

	fn vault(&self) -> Address {
		self.session.sync().view().vault
	}

	fn account(&self) -> Result<Address, Error> {
		self.session.client().account().ok_or(Error::NotConnected)
	}
}
