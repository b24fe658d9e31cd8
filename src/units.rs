//! Conversions between fixed-point base-unit integers and the decimal strings
//! shown to users.
//!
//! All amounts inside the crate are [`U256`] base units. Strings only exist at
//! the display boundary, so nothing here ever goes through floating point.

use alloy::primitives::U256;

/// Number of decimals used by ether values and vault shares.
pub const ETHER_DECIMALS: u8 = 18;

/// Suffixes used by [`compact`], largest first.
const COMPACT_SUFFIXES: [(usize, &str); 4] =
	[(12, "T"), (9, "B"), (6, "M"), (3, "K")];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	#[error("amount is empty")]
	Empty,

	#[error("not a number: {0:?}")]
	NotNumeric(String),

	#[error("too many fractional digits, at most {decimals} are allowed")]
	TooPrecise { decimals: u8 },

	#[error("amount does not fit in 256 bits")]
	Overflow,
}

/// Formats `base_units` as a decimal string with `decimals` fractional
/// digits.
///
/// The value is never rounded. Trailing fractional zeros are trimmed and the
/// decimal point is omitted for whole values, so `10^18` with 18 decimals is
/// rendered as `"1"`.
pub fn to_display(base_units: U256, decimals: u8) -> String {
	let digits = base_units.to_string();
	let decimals = usize::from(decimals);

	if decimals == 0 {
		return digits;
	}

	let (integer, fraction) = if digits.len() > decimals {
		let (integer, fraction) = digits.split_at(digits.len() - decimals);
		(integer.to_string(), fraction.to_string())
	} else {
		("0".to_string(), format!("{digits:0>decimals$}"))
	};

	let fraction = fraction.trim_end_matches('0');
	if fraction.is_empty() {
		integer
	} else {
		format!("{integer}.{fraction}")
	}
}

/// Parses a decimal string into base units.
///
/// This is the exact inverse of [`to_display`]. Input with more fractional
/// digits than `decimals` is rejected rather than rounded.
pub fn to_base_units(display: &str, decimals: u8) -> Result<U256, ParseError> {
	let trimmed = display.trim();
	if trimmed.is_empty() {
		return Err(ParseError::Empty);
	}

	let (integer, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
	let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

	if (integer.is_empty() && fraction.is_empty())
		|| !is_digits(integer)
		|| !is_digits(fraction)
	{
		return Err(ParseError::NotNumeric(display.to_string()));
	}

	if fraction.len() > usize::from(decimals) {
		return Err(ParseError::TooPrecise { decimals });
	}

	let width = usize::from(decimals);
	let digits = format!("{integer}{fraction:0<width$}");
	let digits = digits.trim_start_matches('0');

	if digits.is_empty() {
		return Ok(U256::ZERO);
	}

	U256::from_str_radix(digits, 10).map_err(|_| ParseError::Overflow)
}

/// Formats a value with 18 decimals.
pub fn ether(value: U256) -> String {
	to_display(value, ETHER_DECIMALS)
}

/// Abbreviated rendering for dashboards, e.g. `"1.2K"` or `"800M"`.
///
/// Values below one thousand keep at most two fractional digits. The output
/// is truncated, never rounded, and must not be parsed back.
pub fn compact(base_units: U256, decimals: u8) -> String {
	let display = to_display(base_units, decimals);
	let (integer, fraction) =
		display.split_once('.').unwrap_or((display.as_str(), ""));

	for (exponent, suffix) in COMPACT_SUFFIXES {
		if integer.len() > exponent {
			let split = integer.len() - exponent;
			let head = &integer[..split];
			let tenth = &integer[split..=split];
			return if tenth == "0" {
				format!("{head}{suffix}")
			} else {
				format!("{head}.{tenth}{suffix}")
			};
		}
	}

	let fraction = fraction.get(..2).unwrap_or(fraction);
	let fraction = fraction.trim_end_matches('0');
	if fraction.is_empty() {
		integer.to_string()
	} else {
		format!("{integer}.{fraction}")
	}
}

/// Share of `amount` in `max` as a rounded percentage.
///
/// Returns zero when `max` is zero. Amounts above `max` yield values above
/// 100 so callers can report an over-limit input.
pub fn to_percent(amount: U256, max: U256) -> u64 {
	if max.is_zero() {
		return 0;
	}

	let scaled = amount.saturating_mul(U256::from(100));
	let rounded = scaled.saturating_add(max / U256::from(2)) / max;
	rounded.saturating_to::<u64>()
}

/// Amount corresponding to `percent` of `max`, rounded down.
pub fn from_percent(percent: u64, max: U256) -> U256 {
	U256::from(percent).saturating_mul(max) / U256::from(100)
}
