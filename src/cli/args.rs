use {
	super::{action, status},
	clap::{ArgAction, Parser, Subcommand},
	core::time::Duration,
	sifa::{Address, Chain, Config, Contracts, RpcClient},
	std::sync::Arc,
};

#[derive(Parser, Debug)]
#[command(name = "sifa", about = "SIFA contracts dashboard", version)]
pub struct CliOpts {
	/// Logging verbosity level (-v, -vv, -vvv)
	#[clap(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// JSON-RPC endpoint of the node
	#[clap(
		long,
		env = "SIFA_RPC_URL",
		default_value = "http://127.0.0.1:8545",
		global = true
	)]
	pub rpc_url: String,

	/// Chain the contracts are deployed on, by name or chain id
	#[clap(long, env = "SIFA_CHAIN", default_value = "arbitrum", global = true)]
	pub chain: Chain,

	/// Address of the SIFA token
	#[clap(long, env = "SIFA_ADDRESS_TOKEN", global = true)]
	pub token: Option<Address>,

	/// Address of the faucet
	#[clap(long, env = "SIFA_ADDRESS_FAUCET", global = true)]
	pub faucet: Option<Address>,

	/// Address of the emitter
	#[clap(long, env = "SIFA_ADDRESS_EMITTER", global = true)]
	pub emitter: Option<Address>,

	/// Address of the staking vault
	#[clap(long, env = "SIFA_ADDRESS_VAULT", global = true)]
	pub vault: Option<Address>,

	/// Node-managed account used for reads and transactions
	#[clap(long, env = "SIFA_ACCOUNT", global = true)]
	pub account: Option<Address>,

	/// Status polling period, e.g. "10s"
	#[clap(long, default_value = "10s", value_parser = humantime::parse_duration, global = true)]
	pub poll_interval: Duration,

	/// Commands
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the current status of a view
	Status(status::Command),
	/// Print a view on every refresh until interrupted
	Watch(status::WatchCommand),
	/// Claim tokens from the faucet
	Claim,
	/// Withdraw released tokens from the emitter to the vault
	Withdraw,
	/// Start emission (owner only)
	Start,
	/// Approve the vault to spend your tokens
	Approve,
	/// Deposit tokens into the vault
	Deposit(action::AmountArgs),
	/// Redeem vault shares
	Redeem(action::AmountArgs),
}

impl CliOpts {
	pub async fn run(&self) -> anyhow::Result<()> {
		match &self.command {
			Command::Status(cmd) => cmd.execute(self).await,
			Command::Watch(cmd) => cmd.execute(self).await,
			Command::Claim => action::claim(self).await,
			Command::Withdraw => action::withdraw(self).await,
			Command::Start => action::start(self).await,
			Command::Approve => action::approve(self).await,
			Command::Deposit(args) => action::deposit(self, args).await,
			Command::Redeem(args) => action::redeem(self, args).await,
		}
	}

	pub fn config(&self) -> anyhow::Result<Config> {
		let required = |address: Option<Address>, name: &str| {
			address.ok_or_else(|| {
				anyhow::anyhow!(
					"missing {name} address, pass --{name} or set SIFA_ADDRESS_{}",
					name.to_ascii_uppercase()
				)
			})
		};

		let contracts = Contracts {
			token: required(self.token, "token")?,
			faucet: required(self.faucet, "faucet")?,
			emitter: required(self.emitter, "emitter")?,
			vault: required(self.vault, "vault")?,
		};

		Ok(Config::builder()
			.with_chain(self.chain)
			.with_contracts(contracts)
			.with_poll_interval(self.poll_interval)
			.build()?)
	}

	pub fn client(&self, config: &Config) -> anyhow::Result<Arc<RpcClient>> {
		let client = RpcClient::new(
			&self.rpc_url,
			self.account,
			config.receipt_poll_interval,
		)?;
		Ok(Arc::new(client))
	}
}
