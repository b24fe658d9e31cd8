mod action;
mod args;
mod status;
mod tracing;

pub use {args::CliOpts, tracing::setup as setup_tracing};
