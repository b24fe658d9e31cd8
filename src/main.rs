use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let opts = cli::CliOpts::parse();
	cli::setup_tracing(&opts);
	tracing::debug!("CLI options: {opts:#?}");

	opts.run().await
}
