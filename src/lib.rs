//! # Sifa
//!
//! Status synchronization for the SIFA token contracts: the faucet, the
//! emitter and the ERC-4626 staking vault.
//!
//! Every view polls a batch of contract reads, projects it into a typed status
//! record and publishes it as a [`Snapshot`]. User actions are permitted or
//! refused by a [`Gate`] and submitted through a per-view [`Submitter`] that
//! tracks the transaction until the view reflects it.

pub mod chain;
pub mod config;
pub mod gate;
pub mod primitives;
pub mod sync;
pub mod tx;
pub mod units;
pub mod views;

mod error;

pub use {
	alloy::primitives::{Address, TxHash, U256},
	chain::{ChainClient, RpcClient},
	config::{Chain, Config, Contracts},
	error::Error,
	gate::{Gate, GateDecision},
	sync::{Snapshot, Synchronizer, View},
	tx::{AmountInput, Notice, PendingAction, Submitter},
	views::{Account, Emitter, Faucet, Staking},
};
