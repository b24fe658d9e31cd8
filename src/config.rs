use {
	crate::sync::DEFAULT_POLL_INTERVAL,
	alloy::primitives::Address,
	core::{str::FromStr, time::Duration},
	derive_builder::Builder,
	derive_more::Display,
	serde::{Deserialize, Serialize},
};

/// Networks the contracts are deployed on.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
	#[display("Arbitrum One")]
	Arbitrum,

	#[display("Arbitrum Sepolia")]
	ArbitrumSepolia,

	#[display("Hardhat")]
	Hardhat,
}

impl Chain {
	pub const ALL: [Self; 3] = [Self::Arbitrum, Self::ArbitrumSepolia, Self::Hardhat];

	pub const fn id(self) -> u64 {
		match self {
			Self::Arbitrum => 42_161,
			Self::ArbitrumSepolia => 421_614,
			Self::Hardhat => 31_337,
		}
	}

	pub fn from_id(id: u64) -> Option<Self> {
		Self::ALL.into_iter().find(|chain| chain.id() == id)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chain {0:?}, expected arbitrum, arbitrum-sepolia, hardhat or a chain id")]
pub struct UnknownChain(String);

impl FromStr for Chain {
	type Err = UnknownChain;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"arbitrum" | "arbitrum-one" => Ok(Self::Arbitrum),
			"arbitrum-sepolia" => Ok(Self::ArbitrumSepolia),
			"hardhat" | "localhost" => Ok(Self::Hardhat),
			other => other
				.parse::<u64>()
				.ok()
				.and_then(Self::from_id)
				.ok_or_else(|| UnknownChain(s.to_string())),
		}
	}
}

/// Addresses of the known contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contracts {
	pub token: Address,
	pub faucet: Address,
	pub emitter: Address,
	pub vault: Address,
}

/// Static configuration shared by all views.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq, Eq)]
#[builder(
	pattern = "owned",
	setter(prefix = "with"),
	derive(Debug, Clone),
	build_fn(validate = "Self::validate")
)]
#[builder_struct_attr(doc(hidden))]
pub struct Config {
	/// The chain the contracts are expected on.
	#[builder(default = "Chain::Arbitrum")]
	pub chain: Chain,

	/// Addresses of the token, faucet, emitter and vault contracts.
	pub contracts: Contracts,

	/// Period of the status polling loops. Must be non-zero.
	#[builder(default = "DEFAULT_POLL_INTERVAL")]
	pub poll_interval: Duration,

	/// How often a submitted transaction is checked for a receipt. Must be
	/// non-zero.
	#[builder(default = "Duration::from_secs(1)")]
	pub receipt_poll_interval: Duration,

	/// Token symbol used in display strings.
	#[builder(default = "\"SIFA\".to_string()", setter(into))]
	pub symbol: String,
}

impl Config {
	/// Creates a new config builder with default values.
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::default()
	}
}

impl ConfigBuilder {
	fn validate(&self) -> Result<(), String> {
		if self.poll_interval.is_some_and(|p| p.is_zero()) {
			return Err("poll interval must be non-zero".into());
		}

		if self.receipt_poll_interval.is_some_and(|p| p.is_zero()) {
			return Err("receipt poll interval must be non-zero".into());
		}

		Ok(())
	}
}
