use {
	super::{MockChain, secs},
	alloy::primitives::{Address, U256, address},
	sifa::{
		Chain,
		Config,
		Contracts,
		chain::abi::{IEmitter, IFaucet, IToken, IVault},
		views::StakingStatus,
	},
};

pub const TOKEN: Address = address!("0x1000000000000000000000000000000000000001");
pub const FAUCET: Address = address!("0x2000000000000000000000000000000000000002");
pub const EMITTER: Address = address!("0x3000000000000000000000000000000000000003");
pub const VAULT: Address = address!("0x4000000000000000000000000000000000000004");
pub const ACCOUNT: Address = address!("0x1234500000000000000000000000000000067890");
pub const OWNER: Address = address!("0x0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e");

/// Whole tokens with 18 decimals.
pub fn sifa(amount: u64) -> U256 {
	U256::from(amount) * U256::from(10).pow(U256::from(18))
}

/// Config for the fixture contracts. Polling is slow enough that only the
/// initial and explicitly requested cycles run during a test.
pub fn config() -> Config {
	Config::builder()
		.with_chain(Chain::Arbitrum)
		.with_contracts(Contracts {
			token: TOKEN,
			faucet: FAUCET,
			emitter: EMITTER,
			vault: VAULT,
		})
		.with_poll_interval(secs(3600))
		.build()
		.unwrap()
}

/// A funded faucet dropping 1 SIFA every 24 hours.
pub fn faucet(mock: &MockChain, account: Address, available: bool, next: u64) {
	mock.respond(FAUCET, IFaucet::availableCall { account }, available);
	mock.respond(FAUCET, IFaucet::nextClaimAtCall { account }, U256::from(next));
	mock.respond(TOKEN, IToken::decimalsCall {}, U256::from(18u8));
	mock.respond(TOKEN, IToken::balanceOfCall { account: FAUCET }, sifa(1000));
	mock.respond(FAUCET, IFaucet::DROP_AMOUNTCall {}, sifa(1));
	mock.respond(FAUCET, IFaucet::DELAYCall {}, U256::from(86_400));
	mock.respond(
		FAUCET,
		IFaucet::REQUIRE_ETHCall {},
		U256::from(10_000_000_000_000_000u64),
	);
}

/// An emitter owned by [`OWNER`] releasing 2.5 SIFA per second.
pub fn emitter(mock: &MockChain, started: u64, available: U256) {
	mock.respond(EMITTER, IEmitter::ownerCall {}, OWNER);
	mock.respond(EMITTER, IEmitter::epochCall {}, U256::from(1));
	mock.respond(
		EMITTER,
		IEmitter::rateCall {},
		U256::from(2_500_000_000_000_000_000u64),
	);
	mock.respond(EMITTER, IEmitter::startedCall {}, U256::from(started));
	mock.respond(EMITTER, IEmitter::lockedCall {}, sifa(800_000_000));
	mock.respond(EMITTER, IEmitter::releasedCall {}, sifa(12_345));
	mock.respond(EMITTER, IEmitter::availableCall {}, available);
	mock.respond(EMITTER, IEmitter::lastWithrawalAtCall {}, U256::ZERO);
	mock.respond(EMITTER, IEmitter::vaultCall {}, VAULT);
	mock.respond(TOKEN, IToken::decimalsCall {}, U256::from(18u8));
}

/// Vault position of [`ACCOUNT`] as described by `status`.
pub fn staking(mock: &MockChain, status: &StakingStatus) {
	let account = ACCOUNT;
	mock.respond(TOKEN, IToken::decimalsCall {}, U256::from(status.decimals));
	mock.respond(TOKEN, IToken::balanceOfCall { account }, status.balance);
	mock.respond(
		TOKEN,
		IToken::allowanceCall {
			owner: account,
			spender: VAULT,
		},
		status.allowance,
	);
	mock.respond(
		VAULT,
		IVault::maxDepositCall { receiver: account },
		status.max_deposit,
	);
	mock.respond(VAULT, IVault::balanceOfCall { account }, status.shares);
	mock.respond(
		VAULT,
		IVault::convertToAssetsCall { shares: sifa(1) },
		status.share_price,
	);
	mock.respond(
		VAULT,
		IVault::maxRedeemCall { owner: account },
		status.max_redeem,
	);
	mock.respond(
		VAULT,
		IVault::maxWithdrawCall { owner: account },
		status.max_withdraw,
	);
}

/// A position with 100 SIFA in the wallet, 50 approved, a deposit limit of 40
/// and 10 redeemable shares.
pub fn position() -> StakingStatus {
	StakingStatus {
		decimals: 18,
		balance: sifa(100),
		allowance: sifa(50),
		max_deposit: sifa(40),
		shares: sifa(10),
		share_price: U256::from(1_050_000_000_000_000_000u64),
		max_redeem: sifa(10),
		max_withdraw: U256::from(10_500_000_000_000_000_000u128),
	}
}

pub fn account(mock: &MockChain, balance: U256) {
	mock.respond(TOKEN, IToken::decimalsCall {}, U256::from(18u8));
	mock.respond(TOKEN, IToken::symbolCall {}, "SIFA".to_string());
	mock.respond(TOKEN, IToken::balanceOfCall { account: ACCOUNT }, balance);
}
