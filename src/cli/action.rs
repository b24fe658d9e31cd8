//! Write commands. Each one waits for the view to load, checks the action's
//! gate and reports the outcome notice once the transaction settles.

use {
	super::{args::CliOpts, status::loaded},
	clap::Args,
	sifa::{
		Config,
		Emitter,
		Error,
		Faucet,
		GateDecision,
		Notice,
		RpcClient,
		Staking,
		TxHash,
		units::{ETHER_DECIMALS, to_display},
	},
	std::sync::Arc,
	tokio::sync::broadcast,
};

#[derive(Args, Debug)]
pub struct AmountArgs {
	/// Amount as a decimal number, "max", or a percentage such as "50%"
	/// (redeem only)
	pub amount: String,
}

pub async fn claim(opts: &CliOpts) -> anyhow::Result<()> {
	let (client, config) = connect(opts)?;
	let faucet = Faucet::new(client, &config);
	loaded(&*faucet).await?;

	let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
	if let Some(message) = faucet.status().and_then(|s| s.wait_message(now)) {
		println!("{message}");
	}

	ensure_enabled("claim", faucet.claim_gate())?;
	let notices = faucet.notices();
	settle(faucet.claim().await, notices).await
}

pub async fn withdraw(opts: &CliOpts) -> anyhow::Result<()> {
	let (client, config) = connect(opts)?;
	let emitter = Emitter::new(client, &config);
	loaded(&*emitter).await?;

	ensure_enabled("withdraw", emitter.withdraw_gate())?;
	let notices = emitter.notices();
	settle(emitter.withdraw().await, notices).await
}

pub async fn start(opts: &CliOpts) -> anyhow::Result<()> {
	let (client, config) = connect(opts)?;
	let emitter = Emitter::new(client, &config);
	loaded(&*emitter).await?;

	ensure_enabled("start", emitter.start_gate())?;
	let notices = emitter.notices();
	settle(emitter.start().await, notices).await
}

pub async fn approve(opts: &CliOpts) -> anyhow::Result<()> {
	let (client, config) = connect(opts)?;
	let staking = Staking::new(client, &config);
	loaded(&*staking).await?;

	ensure_enabled("approve", staking.approve_gate())?;
	let notices = staking.notices();
	settle(staking.approve().await, notices).await
}

pub async fn deposit(opts: &CliOpts, args: &AmountArgs) -> anyhow::Result<()> {
	let (client, config) = connect(opts)?;
	let staking = Staking::new(client, &config);
	loaded(&*staking).await?;

	let amount = match args.amount.trim() {
		"max" => staking.fill_max_deposit().unwrap_or_default(),
		amount => staking.parse_deposit(amount)?,
	};

	let decimals = staking.status().map_or(ETHER_DECIMALS, |s| s.decimals);
	println!("Depositing {} {}", to_display(amount, decimals), config.symbol);
	if let Ok(shares) = staking.preview_deposit().await {
		println!("Expected shares: {}", to_display(shares, decimals));
	}

	ensure_enabled("deposit", staking.deposit_gate())?;
	let notices = staking.notices();
	settle(staking.deposit().await, notices).await
}

pub async fn redeem(opts: &CliOpts, args: &AmountArgs) -> anyhow::Result<()> {
	let (client, config) = connect(opts)?;
	let staking = Staking::new(client, &config);
	loaded(&*staking).await?;

	let amount = match args.amount.trim() {
		"max" => staking.fill_max_redeem().unwrap_or_default(),
		amount => match amount.strip_suffix('%') {
			Some(percent) => {
				let percent: u64 = percent.trim().parse()?;
				if percent > 100 {
					anyhow::bail!("percentage must be between 0 and 100");
				}
				staking.set_redeem_percent(percent).unwrap_or_default()
			}
			None => staking.parse_redeem(amount)?,
		},
	};

	let decimals = staking.status().map_or(ETHER_DECIMALS, |s| s.decimals);
	println!(
		"Redeeming {} shares ({}% of redeemable)",
		to_display(amount, decimals),
		staking.redeem_percent().unwrap_or_default()
	);

	if let Ok(assets) = staking.preview_redeem().await {
		println!(
			"Expected return: {} {}",
			to_display(assets, decimals),
			config.symbol
		);
	}

	ensure_enabled("redeem", staking.redeem_gate())?;
	let notices = staking.notices();
	settle(staking.redeem().await, notices).await
}

fn connect(opts: &CliOpts) -> anyhow::Result<(Arc<RpcClient>, Config)> {
	let config = opts.config()?;
	Ok((opts.client(&config)?, config))
}

fn ensure_enabled(action: &str, decision: GateDecision) -> anyhow::Result<()> {
	match decision {
		GateDecision { enabled: true, .. } => Ok(()),
		GateDecision {
			reason: Some(reason),
			..
		} => anyhow::bail!("{action} disabled: {reason}"),
		GateDecision { reason: None, .. } => {
			anyhow::bail!("{action} disabled: enter a non-zero amount")
		}
	}
}

/// Prints the submitted transaction and waits for its settlement notice.
async fn settle(
	submitted: Result<TxHash, Error>,
	mut notices: broadcast::Receiver<Notice>,
) -> anyhow::Result<()> {
	let tx = submitted?;
	println!("Submitted, tx: {tx}");

	match notices.recv().await? {
		Notice::Success { message, .. } => {
			println!("{message}");
			Ok(())
		}
		Notice::Error { message } => anyhow::bail!(message),
	}
}
