use {
	super::{Session, to_u64},
	crate::{
		Error,
		chain::{
			BatchResult,
			ChainClient,
			ReadBatch,
			WriteCall,
			abi::{IEmitter, IToken},
		},
		config::Config,
		gate::{Gate, GateDecision, Rule},
		primitives::UnixTime,
		sync::{ProjectionError, View},
		units::{compact, to_display},
	},
	alloy::primitives::{Address, TxHash, U256},
	derive_more::Deref,
	std::sync::Arc,
};

const WITHDRAW_RULES: [Rule<EmitterStatus>; 1] =
	[Rule::new("nothing to withdraw", |s, _| s.available.is_zero())];

const START_RULES: [Rule<EmitterStatus>; 2] = [
	Rule::new("only the owner can start emission", |s, _| !s.is_owner),
	Rule::new("emission already started", |s, _| s.started != 0),
];

pub static WITHDRAW: Gate<EmitterStatus> =
	Gate::new("withdraw", &WITHDRAW_RULES);

pub static START: Gate<EmitterStatus> = Gate::new("start", &START_RULES);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterStatus {
	pub owner: Address,
	pub epoch: U256,
	/// Tokens released per second, in base units.
	pub rate: U256,
	/// Unix seconds, zero before emission starts.
	pub started: u64,
	pub locked: U256,
	pub released: U256,
	pub available: U256,
	/// Unix seconds, zero before the first withdrawal.
	pub last_withdrawal_at: u64,
	pub vault: Address,
	pub decimals: u8,
	pub is_owner: bool,
}

impl EmitterStatus {
	pub fn lines(&self, symbol: &str) -> Vec<String> {
		let amount = |value| compact(value, self.decimals);

		vec![
			format!("Owner: {}", self.owner),
			format!("Current epoch: {}", self.epoch),
			format!(
				"Current release rate: {} {symbol}/sec",
				to_display(self.rate, self.decimals)
			),
			format!("Emission started: {}", UnixTime(self.started)),
			format!("Tokens locked: {} {symbol}", amount(self.locked)),
			format!("Tokens released: {} {symbol}", amount(self.released)),
			format!(
				"Tokens available to withdraw: {} {symbol}",
				amount(self.available)
			),
			format!("Last withdrawal: {}", UnixTime(self.last_withdrawal_at)),
			format!("Anyone can withdraw to the Vault: {}", self.vault),
		]
	}
}

#[derive(Debug, Clone)]
pub struct EmitterView {
	pub emitter: Address,
	pub token: Address,
	pub account: Option<Address>,
}

impl View for EmitterView {
	type Status = EmitterStatus;

	const NAME: &'static str = "emitter";

	fn reads(&self) -> ReadBatch {
		ReadBatch::new()
			.with("owner", self.emitter, IEmitter::ownerCall {})
			.with("epoch", self.emitter, IEmitter::epochCall {})
			.with("rate", self.emitter, IEmitter::rateCall {})
			.with("started", self.emitter, IEmitter::startedCall {})
			.with("locked", self.emitter, IEmitter::lockedCall {})
			.with("released", self.emitter, IEmitter::releasedCall {})
			.with("available", self.emitter, IEmitter::availableCall {})
			.with(
				"last_withdrawal_at",
				self.emitter,
				IEmitter::lastWithrawalAtCall {},
			)
			.with("vault", self.emitter, IEmitter::vaultCall {})
			.with("decimals", self.token, IToken::decimalsCall {})
	}

	fn project(
		&self,
		batch: &BatchResult,
	) -> Result<EmitterStatus, ProjectionError> {
		let owner = batch.decode::<IEmitter::ownerCall>("owner")?;
		let started = batch.decode::<IEmitter::startedCall>("started")?;
		let last_withdrawal_at =
			batch.decode::<IEmitter::lastWithrawalAtCall>("last_withdrawal_at")?;

		Ok(EmitterStatus {
			owner,
			epoch: batch.decode::<IEmitter::epochCall>("epoch")?,
			rate: batch.decode::<IEmitter::rateCall>("rate")?,
			started: to_u64("started", started)?,
			locked: batch.decode::<IEmitter::lockedCall>("locked")?,
			released: batch.decode::<IEmitter::releasedCall>("released")?,
			available: batch.decode::<IEmitter::availableCall>("available")?,
			last_withdrawal_at: to_u64("last_withdrawal_at", last_withdrawal_at)?,
			vault: batch.decode::<IEmitter::vaultCall>("vault")?,
			decimals: batch.decode::<IToken::decimalsCall>("decimals")?,
			is_owner: self.account == Some(owner),
		})
	}
}

/// The emitter panel: release schedule and the withdraw/start actions.
#[derive(Deref)]
pub struct Emitter<C: ChainClient> {
	#[deref]
	session: Session<EmitterView, C>,
	symbol: String,
}

impl<C: ChainClient> Emitter<C> {
	pub fn new(client: Arc<C>, config: &Config) -> Self {
		let view = EmitterView {
			emitter: config.contracts.emitter,
			token: config.contracts.token,
			account: client.account(),
		};

		Self {
			session: Session::new(client, view, config.poll_interval),
			symbol: config.symbol.clone(),
		}
	}
}

// Public API
impl<C: ChainClient> Emitter<C> {
	pub fn withdraw_gate(&self) -> GateDecision {
		self.session.evaluate(&WITHDRAW, U256::ZERO)
	}

	pub fn start_gate(&self) -> GateDecision {
		self.session.evaluate(&START, U256::ZERO)
	}

	/// Moves the released tokens into the vault. Anyone may call it.
	pub async fn withdraw(&self) -> Result<TxHash, Error> {
		let call = WriteCall::new(self.emitter(), &IEmitter::withdrawCall {});
		tracing::info!("emitter withdrawal requested");
		self.session.act(&WITHDRAW, U256::ZERO, call, vec![]).await
	}

	/// Starts emission. Only the owner may call it, once.
	pub async fn start(&self) -> Result<TxHash, Error> {
		let call = WriteCall::new(self.emitter(), &IEmitter::startCall {});
		tracing::info!("emission start requested");
		self.session.act(&START, U256::ZERO, call, vec![]).await
	}

	pub fn lines(&self) -> Vec<String> {
		self
			.session
			.status()
			.map(|status| status.lines(&self.symbol))
			.unwrap_or_default()
	}

	fn emitter(&self) -> Address {
		self.session.sync().view().emitter
	}
}
