//! Contract interfaces used by the views.
//!
//! Only the functions the dashboard reads or writes are declared.

#![allow(missing_docs)]

use alloy::sol;

sol! {
	/// The SIFA ERC-20 token.
	#[derive(Debug, PartialEq, Eq)]
	interface IToken {
		function symbol() external view returns (string memory);
		function decimals() external view returns (uint8);
		function balanceOf(address account) external view returns (uint256);
		function allowance(address owner, address spender) external view returns (uint256);
		function approve(address spender, uint256 amount) external returns (bool);
	}
}

sol! {
	/// Claim-once-per-delay token faucet.
	#[derive(Debug, PartialEq, Eq)]
	interface IFaucet {
		function available(address account) external view returns (bool);
		function nextClaimAt(address account) external view returns (uint256);
		function DROP_AMOUNT() external view returns (uint256);
		function DELAY() external view returns (uint256);
		function REQUIRE_ETH() external view returns (uint256);
		function drop(address to) external;
	}
}

sol! {
	/// Time-based emitter releasing tokens per second into the vault.
	#[derive(Debug, PartialEq, Eq)]
	interface IEmitter {
		function owner() external view returns (address);
		function epoch() external view returns (uint256);
		function rate() external view returns (uint256);
		function started() external view returns (uint256);
		function locked() external view returns (uint256);
		function released() external view returns (uint256);
		function available() external view returns (uint256);
		function lastWithrawalAt() external view returns (uint256);
		function vault() external view returns (address);
		function withdraw() external;
		function start() external;
	}
}

sol! {
	/// ERC-4626 staking vault holding SIFA.
	#[derive(Debug, PartialEq, Eq)]
	interface IVault {
		function balanceOf(address account) external view returns (uint256);
		function maxDeposit(address receiver) external view returns (uint256);
		function maxRedeem(address owner) external view returns (uint256);
		function maxWithdraw(address owner) external view returns (uint256);
		function convertToAssets(uint256 shares) external view returns (uint256);
		function previewDeposit(uint256 assets) external view returns (uint256);
		function previewRedeem(uint256 shares) external view returns (uint256);
		function deposit(uint256 assets, address receiver) external returns (uint256);
		function redeem(uint256 shares, address receiver, address owner) external returns (uint256);
	}
}
