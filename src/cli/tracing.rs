use {
	super::args::CliOpts,
	tracing_subscriber::{filter::filter_fn, prelude::*},
};

/// Sets up tracing/logging for the CLI based on verbosity level.
pub fn setup(opts: &CliOpts) {
	let log_level = match opts.verbose {
		0 => tracing::Level::INFO,
		1 => tracing::Level::DEBUG,
		_ => tracing::Level::TRACE,
	};

	// http transport internals
	let muted: &[&'static str] = &[
		"jsonrpsee",
		"hyper",
		"hyper_util",
		"h2",
		"rustls",
		"tower",
		"mio",
	];

	let unmute = std::env::var("SIFA_NOISY_TRACE")
		.map(|val| val == "1" || val == "on" || val == "yes")
		.unwrap_or(false);

	let _ = tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.with(filter_fn(move |metadata| {
			metadata.level() <= &log_level
				&& (unmute
					|| !muted
						.iter()
						.any(|prefix| metadata.target().starts_with(prefix)))
		}))
		.try_init();
}
