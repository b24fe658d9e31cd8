//! Formatting utilities for display strings.

use {
	alloy::primitives::{Address, hex},
	chrono::{DateTime, Utc},
	core::{fmt, time::Duration},
};

/// Formats an address as `0x` followed by its first `START` and last `END`
/// hex digits, e.g. `0x12…345`.
pub struct Truncated<const START: usize = 2, const END: usize = 3>(pub Address);

impl<const START: usize, const END: usize> fmt::Display
	for Truncated<START, END>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let digits = hex::encode(self.0);
		if START + END >= digits.len() {
			return write!(f, "0x{digits}");
		}

		write!(f, "0x{}…{}", &digits[..START], &digits[digits.len() - END..])
	}
}

/// Formats a unix timestamp in seconds, or `"no"` when it is zero.
pub struct UnixTime(pub u64);

impl fmt::Display for UnixTime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match i64::try_from(self.0)
			.ok()
			.filter(|secs| *secs > 0)
			.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
		{
			Some(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S UTC")),
			None => write!(f, "no"),
		}
	}
}

/// Formats a duration in hours with up to two decimals, e.g. `"24 hours"` or
/// `"1.5 hours"`.
pub struct Hours(pub Duration);

impl fmt::Display for Hours {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let hundredths = (u128::from(self.0.as_secs()) * 100 + 1800) / 3600;
		let (whole, fraction) = (hundredths / 100, hundredths % 100);

		match (whole, fraction) {
			(1, 0) => write!(f, "1 hour"),
			(_, 0) => write!(f, "{whole} hours"),
			(_, fraction) if fraction % 10 == 0 => {
				write!(f, "{whole}.{} hours", fraction / 10)
			}
			_ => write!(f, "{whole}.{fraction:02} hours"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncated_address() {
		let address = Address::repeat_byte(0xab);
		assert_eq!(Truncated::<2, 3>(address).to_string(), "0xab…bab");
		assert_eq!(Truncated::<1, 2>(address).to_string(), "0xa…ab");
	}

	#[test]
	fn unix_time() {
		assert_eq!(UnixTime(0).to_string(), "no");
		assert_eq!(UnixTime(86_400).to_string(), "1970-01-02 00:00:00 UTC");
	}

	#[test]
	fn hours() {
		assert_eq!(Hours(Duration::from_secs(86_400)).to_string(), "24 hours");
		assert_eq!(Hours(Duration::from_secs(3_600)).to_string(), "1 hour");
		assert_eq!(Hours(Duration::from_secs(5_400)).to_string(), "1.5 hours");
		assert_eq!(Hours(Duration::from_secs(900)).to_string(), "0.25 hours");
		assert_eq!(Hours(Duration::from_secs(1_000)).to_string(), "0.28 hours");
		assert_eq!(Hours(Duration::ZERO).to_string(), "0 hours");
	}
}
