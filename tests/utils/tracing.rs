/// Enables log output for tests, e.g. `TEST_TRACE=debug cargo test`.
#[ctor::ctor]
fn init_test_logging() {
	use tracing_subscriber::{EnvFilter, prelude::*};

	if tracing::dispatcher::has_been_set() {
		return;
	}

	let Ok(value) = std::env::var("TEST_TRACE") else {
		return;
	};

	let level = match value.as_str() {
		"true" | "on" => tracing::Level::DEBUG,
		other => match other.parse() {
			Ok(level) => level,
			Err(_) => return,
		},
	};

	let mut filter = EnvFilter::default().add_directive(level.into());
	if std::env::var("TEST_TRACE_UNMUTE").is_err() {
		for muted in ["jsonrpsee=warn", "hyper=warn", "h2=warn"] {
			filter = filter.add_directive(muted.parse().unwrap());
		}
	}

	let _ = tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer().with_test_writer())
		.with(filter)
		.try_init();
}
