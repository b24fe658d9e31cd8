use {
	crate::units::{self, ParseError},
	alloy::primitives::U256,
	std::sync::Arc,
	tokio::sync::watch,
};

/// A user entered quantity, held in base units.
///
/// Clones share the same value. Malformed input is rejected and leaves the
/// previous value untouched.
#[derive(Debug, Clone)]
pub struct AmountInput {
	value: Arc<watch::Sender<U256>>,
}

impl Default for AmountInput {
	fn default() -> Self {
		Self::new()
	}
}

impl AmountInput {
	pub fn new() -> Self {
		Self {
			value: Arc::new(watch::Sender::new(U256::ZERO)),
		}
	}

	pub fn get(&self) -> U256 {
		*self.value.borrow()
	}

	pub fn set(&self, value: U256) {
		self.value.send_replace(value);
	}

	/// Parses a decimal string and stores it on success.
	pub fn parse(&self, display: &str, decimals: u8) -> Result<U256, ParseError> {
		let value = units::to_base_units(display, decimals)?;
		self.set(value);
		Ok(value)
	}

	/// The current value as a decimal string.
	pub fn display(&self, decimals: u8) -> String {
		units::to_display(self.get(), decimals)
	}

	/// Resets the value to zero.
	pub fn clear(&self) {
		self.set(U256::ZERO);
	}

	/// Observes changes of this input.
	pub fn subscribe(&self) -> watch::Receiver<U256> {
		self.value.subscribe()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejected_input_keeps_previous_value() {
		let input = AmountInput::new();
		input.parse("1.5", 18).unwrap();
		let previous = input.get();

		assert!(input.parse("abc", 18).is_err());
		assert_eq!(input.get(), previous);
		assert_eq!(input.display(18), "1.5");
	}

	#[test]
	fn clones_share_value() {
		let input = AmountInput::new();
		let other = input.clone();
		other.set(U256::from(7));
		assert_eq!(input.get(), U256::from(7));

		input.clear();
		assert_eq!(other.get(), U256::ZERO);
	}
}
