//! Helpers and types used across the crate.

mod fmt;

pub use fmt::{Hours, Truncated, UnixTime};
