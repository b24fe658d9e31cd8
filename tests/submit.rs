use {
	crate::utils::*,
	futures::join,
	sifa::{
		Error,
		GateDecision,
		Notice,
		PendingAction,
		Staking,
		Submitter,
		Synchronizer,
		chain::{TransactionError, WriteCall, abi::IFaucet},
		gate::IN_PROGRESS,
		views::FaucetView,
	},
	std::sync::Arc,
};

async fn open() -> anyhow::Result<(Arc<MockChain>, Staking<MockChain>)> {
	let mock = Arc::new(MockChain::new(Some(ACCOUNT)));
	staking(&mock, &position());

	let staking = Staking::new(Arc::clone(&mock), &config());
	timeout_s(5, staking.when().ready()).await?;
	Ok((mock, staking))
}

#[tokio::test]
async fn settlement_clears_inputs_and_refreshes_once() -> anyhow::Result<()> {
	let (mock, staking) = open().await?;
	assert_eq!(mock.reads(), 1);

	let mut notices = staking.notices();
	let mut pending = staking.subscribe_pending();

	staking.deposit_input().set(sifa(10));
	staking.redeem_input().set(sifa(1));
	let tx = staking.deposit().await?;

	assert_eq!(staking.pending(), PendingAction::Submitted { tx });
	assert_eq!(staking.deposit_gate(), GateDecision::disabled(IN_PROGRESS));
	assert_eq!(staking.deposit_input().get(), sifa(10));

	// keep the post-settlement refresh in flight to observe `Confirmed`
	mock.hold_reads(true);
	mock.mine(tx, true);

	timeout_s(5, pending.wait_for(|p| *p == PendingAction::Confirmed { tx }))
		.await??;
	assert_eq!(staking.deposit_input().get(), sifa(0));
	assert_eq!(staking.redeem_input().get(), sifa(1));
	assert_eq!(staking.redeem_gate(), GateDecision::disabled(IN_PROGRESS));
	assert_eq!(timeout_s(5, notices.recv()).await??, Notice::Success {
		message: format!("Success, tx: {tx}"),
		tx,
	});

	mock.hold_reads(false);
	timeout_s(5, pending.wait_for(|p| *p == PendingAction::Idle)).await??;
	assert_eq!(staking.snapshot().generation(), 2);

	tokio::time::sleep(millis(200)).await;
	assert_eq!(mock.reads(), 2);

	Ok(())
}

#[tokio::test]
async fn reverted_transaction_keeps_inputs() -> anyhow::Result<()> {
	let (mock, staking) = open().await?;
	let mut notices = staking.notices();
	let mut pending = staking.subscribe_pending();

	staking.deposit_input().set(sifa(10));
	let tx = staking.deposit().await?;
	mock.mine(tx, false);

	let reverted = TransactionError::Reverted(tx);
	timeout_s(5, pending.wait_for(|p| matches!(p, PendingAction::Failed { .. })))
		.await??;
	assert_eq!(staking.pending(), PendingAction::Failed {
		error: reverted.clone()
	});
	assert_eq!(timeout_s(5, notices.recv()).await??, Notice::Error {
		message: reverted.to_string(),
	});

	assert_eq!(staking.deposit_input().get(), sifa(10));
	assert_eq!(staking.deposit_gate(), GateDecision::enabled());

	timeout_s(5, staking.when().generation(2)).await?;
	tokio::time::sleep(millis(200)).await;
	assert_eq!(mock.reads(), 2);

	Ok(())
}

#[tokio::test]
async fn rejected_submission_is_surfaced_verbatim() -> anyhow::Result<()> {
	let (mock, staking) = open().await?;
	let mut notices = staking.notices();

	let rejected = TransactionError::Rejected("user denied transaction".into());
	mock.fail_sends(Some(rejected.clone()));

	staking.deposit_input().set(sifa(10));
	let err = staking.deposit().await.unwrap_err();
	assert!(matches!(&err, Error::Transaction(e) if *e == rejected));

	assert_eq!(timeout_s(5, notices.recv()).await??, Notice::Error {
		message: "transaction rejected: user denied transaction".into(),
	});
	assert_eq!(staking.pending(), PendingAction::Failed { error: rejected });
	assert_eq!(staking.deposit_input().get(), sifa(10));

	// retrying after a failure is allowed
	mock.fail_sends(None);
	let tx = staking.deposit().await?;
	assert_eq!(staking.pending(), PendingAction::Submitted { tx });

	Ok(())
}

#[tokio::test]
async fn at_most_one_pending_action() -> anyhow::Result<()> {
	let mock = Arc::new(MockChain::new(Some(ACCOUNT)));
	faucet(&mock, ACCOUNT, true, 0);

	let view = FaucetView {
		faucet: FAUCET,
		token: TOKEN,
		account: ACCOUNT,
	};
	let sync = Synchronizer::spawn(Arc::clone(&mock), view, secs(3600));
	let submitter = Submitter::new(Arc::clone(&mock), sync.refresher());

	let call = WriteCall::new(FAUCET, &IFaucet::dropCall { to: ACCOUNT });
	let (first, second) = join!(
		submitter.submit("claim", call.clone(), vec![]),
		submitter.submit("claim", call.clone(), vec![]),
	);

	let results = [first, second];
	assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
	assert!(
		results
			.iter()
			.any(|r| *r == Err(TransactionError::InProgress))
	);
	assert_eq!(mock.sent().len(), 1);

	let tx = submitter.pending().tx().unwrap();
	mock.mine(tx, true);

	let mut pending = submitter.subscribe();
	timeout_s(5, pending.wait_for(|p| *p == PendingAction::Idle)).await??;
	assert!(submitter.submit("claim", call, vec![]).await.is_ok());

	Ok(())
}
