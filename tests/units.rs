use {
	alloy::primitives::U256,
	proptest::prelude::*,
	sifa::units::{to_base_units, to_display},
};

proptest! {
	#[test]
	fn display_round_trips(limbs in any::<[u64; 4]>(), decimals in 0u8..=36) {
		let value = U256::from_limbs(limbs);
		let display = to_display(value, decimals);
		prop_assert_eq!(to_base_units(&display, decimals), Ok(value));
	}

	#[test]
	fn parse_never_panics(input in "[0-9.+-]{0,80}", decimals in 0u8..=36) {
		if let Ok(value) = to_base_units(&input, decimals) {
			prop_assert_eq!(to_base_units(&to_display(value, decimals), decimals), Ok(value));
		}
	}
}
