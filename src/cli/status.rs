//! Read-only commands: print a view once or on every refresh.

use {
	super::args::CliOpts,
	chrono::Utc,
	clap::{Args, ValueEnum},
	sifa::{
		Account,
		ChainClient,
		Config,
		Emitter,
		Faucet,
		RpcClient,
		Staking,
		View,
		views::Session,
	},
	std::sync::Arc,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
	Faucet,
	Emitter,
	Staking,
	Account,
}

#[derive(Args, Debug)]
pub struct Command {
	/// The view to print
	pub view: ViewKind,
}

impl Command {
	pub async fn execute(&self, opts: &CliOpts) -> anyhow::Result<()> {
		let config = opts.config()?;
		let panel = Panel::open(self.view, opts.client(&config)?, &config)?;

		panel.loaded().await?;
		for line in panel.lines().await {
			println!("{line}");
		}

		Ok(())
	}
}

#[derive(Args, Debug)]
pub struct WatchCommand {
	/// The view to watch
	pub view: ViewKind,
}

impl WatchCommand {
	pub async fn execute(&self, opts: &CliOpts) -> anyhow::Result<()> {
		let config = opts.config()?;
		let panel = Panel::open(self.view, opts.client(&config)?, &config)?;

		let mut seen = panel.cycles();
		loop {
			tokio::select! {
				_ = tokio::signal::ctrl_c() => break,
				() = panel.cycle(seen + 1) => {
					// cycles completed while printing are folded into this one
					seen = panel.cycles();
					match panel.stale() {
						Some(error) => println!("stale: {error}"),
						None => {
							println!("--- {}", Utc::now().format("%H:%M:%S"));
							for line in panel.lines().await {
								println!("{line}");
							}
						}
					}
				}
			}
		}

		Ok(())
	}
}

/// One of the dashboard views, opened over the RPC client.
pub enum Panel {
	Faucet(Faucet<RpcClient>),
	Emitter(Emitter<RpcClient>),
	Staking(Staking<RpcClient>),
	Account(Account<RpcClient>),
}

impl Panel {
	pub fn open(
		kind: ViewKind,
		client: Arc<RpcClient>,
		config: &Config,
	) -> anyhow::Result<Self> {
		Ok(match kind {
			ViewKind::Faucet => Self::Faucet(Faucet::new(client, config)),
			ViewKind::Emitter => Self::Emitter(Emitter::new(client, config)),
			ViewKind::Staking => Self::Staking(Staking::new(client, config)),
			ViewKind::Account => Self::Account(Account::new(client, config)?),
		})
	}

	/// Waits for the first refresh cycle and fails if it did not succeed.
	pub async fn loaded(&self) -> anyhow::Result<()> {
		match self {
			Self::Faucet(view) => loaded(&**view).await,
			Self::Emitter(view) => loaded(&**view).await,
			Self::Staking(view) => loaded(&**view).await,
			Self::Account(view) => loaded(&**view).await,
		}
	}

	/// Number of completed refresh cycles.
	fn cycles(&self) -> u64 {
		match self {
			Self::Faucet(view) => view.snapshot().cycles(),
			Self::Emitter(view) => view.snapshot().cycles(),
			Self::Staking(view) => view.snapshot().cycles(),
			Self::Account(view) => view.snapshot().cycles(),
		}
	}

	/// Waits until `cycles` refresh cycles have completed.
	async fn cycle(&self, cycles: u64) {
		match self {
			Self::Faucet(view) => view.when().cycles(cycles).await,
			Self::Emitter(view) => view.when().cycles(cycles).await,
			Self::Staking(view) => view.when().cycles(cycles).await,
			Self::Account(view) => view.when().cycles(cycles).await,
		}
	}

	fn stale(&self) -> Option<String> {
		match self {
			Self::Faucet(view) => view.snapshot().stale().map(ToString::to_string),
			Self::Emitter(view) => view.snapshot().stale().map(ToString::to_string),
			Self::Staking(view) => view.snapshot().stale().map(ToString::to_string),
			Self::Account(view) => view.snapshot().stale().map(ToString::to_string),
		}
	}

	pub async fn lines(&self) -> Vec<String> {
		match self {
			Self::Faucet(faucet) => {
				let mut lines = faucet.lines();
				let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
				if let Some(status) = faucet.status() {
					lines.extend(status.wait_message(now));
				}
				lines.push(format!("Claim: {}", faucet.claim_gate()));
				lines
			}
			Self::Emitter(emitter) => {
				let mut lines = emitter.lines();
				lines.push(format!("Withdraw: {}", emitter.withdraw_gate()));
				lines.push(format!("Start: {}", emitter.start_gate()));
				lines
			}
			Self::Staking(staking) => {
				let mut lines = staking.lines();
				lines.push(format!("Approve: {}", staking.approve_gate()));
				lines
			}
			Self::Account(account) => {
				let mut lines = vec![format!("Account: {}", account.short_address())];
				lines.extend(account.balance_line());
				lines.push(match account.connection().await {
					Ok(connection) => format!("Network: {connection}"),
					Err(error) => format!("Network: disconnected ({error})"),
				});
				lines
			}
		}
	}
}

pub async fn loaded<V: View, C: ChainClient>(
	session: &Session<V, C>,
) -> anyhow::Result<()> {
	let when = session.when();

	tokio::select! {
		() = when.ready() => Ok(()),
		() = when.stale() => match session.snapshot().stale() {
			Some(error) => anyhow::bail!("{} status unavailable: {error}", V::NAME),
			None => Ok(()),
		},
	}
}
