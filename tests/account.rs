use {
	crate::utils::*,
	alloy::primitives::U256,
	sifa::{
		Account,
		Chain,
		Error,
		views::Connection,
	},
	std::sync::Arc,
};

#[tokio::test]
async fn balance_and_address() -> anyhow::Result<()> {
	let mock = Arc::new(MockChain::new(Some(ACCOUNT)));
	account(&mock, U256::from(1_234_500_000_000_000_000_000u128));

	let account = Account::new(Arc::clone(&mock), &config())?;
	timeout_s(5, account.when().ready()).await?;

	assert_eq!(account.address(), ACCOUNT);
	assert_eq!(account.short_address(), "0x12…890");
	assert_eq!(account.balance_line().as_deref(), Some("1.2K SIFA"));
	assert_eq!(account.status().unwrap().symbol, "SIFA");

	Ok(())
}

#[tokio::test]
async fn empty_wallet_has_no_balance_line() -> anyhow::Result<()> {
	let mock = Arc::new(MockChain::new(Some(ACCOUNT)));
	account(&mock, U256::ZERO);

	let account = Account::new(Arc::clone(&mock), &config())?;
	timeout_s(5, account.when().ready()).await?;

	assert_eq!(account.balance_line(), None);
	Ok(())
}

#[tokio::test]
async fn connection_badge() -> anyhow::Result<()> {
	let mock = Arc::new(MockChain::new(Some(ACCOUNT)));
	let account = Account::new(Arc::clone(&mock), &config())?;
	let connection = account.connection().await?;
	assert_eq!(connection, Connection::Connected(Chain::Arbitrum));
	assert_eq!(connection.to_string(), "connected to Arbitrum One");

	let elsewhere = Arc::new(MockChain::new(Some(ACCOUNT)).with_chain_id(421_614));
	let account = Account::new(elsewhere, &config())?;
	let connection = account.connection().await?;
	assert!(!connection.is_connected());
	assert_eq!(
		connection.to_string(),
		"disconnected: on Arbitrum Sepolia, expected Arbitrum One"
	);

	let unknown = Arc::new(MockChain::new(Some(ACCOUNT)).with_chain_id(1));
	let account = Account::new(unknown, &config())?;
	assert_eq!(
		account.connection().await?.to_string(),
		"disconnected: on chain 1, expected Arbitrum One"
	);

	Ok(())
}

#[tokio::test]
async fn requires_a_connected_account() {
	let mock = Arc::new(MockChain::new(None));
	assert!(matches!(
		Account::new(mock, &config()),
		Err(Error::NotConnected)
	));
}
