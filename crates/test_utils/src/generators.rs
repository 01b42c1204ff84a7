//! Property-Based Test Generators
//!
//! Provides proptest strategies and fake data for generating random test
//! inputs that maintain domain invariants.

use domain_customer::{CustomerInput, NewAddress};
use fake::faker::address::en::{CityName, StateAbbr, StreetName};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for postal codes in the `NNNNN-NNN` format
pub fn postal_code_strategy() -> impl Strategy<Value = String> {
    "[0-9]{5}-[0-9]{3}"
}

/// Strategy for non-empty customer names
pub fn customer_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,15}( [A-Z][a-z]{1,15})?"
}

/// Strategy for customer inputs
pub fn customer_input_strategy() -> impl Strategy<Value = CustomerInput> {
    (customer_name_strategy(), postal_code_strategy())
        .prop_map(|(name, code)| CustomerInput::new(name, code))
}

/// Strategy for account numbers
pub fn account_number_strategy() -> impl Strategy<Value = String> {
    "[0-9]{5}-[0-9]"
}

/// Strategy for monetary amounts with two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a realistic person name
pub fn fake_customer_name() -> String {
    Name().fake()
}

/// Generates a complete address for the given postal code
pub fn fake_address(postal_code: &str) -> NewAddress {
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let state: String = StateAbbr().fake();

    NewAddress::new(postal_code).street(street).city(city).state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_postal_codes_have_nine_chars(code in postal_code_strategy()) {
            prop_assert_eq!(code.len(), 9);
            prop_assert_eq!(&code[5..6], "-");
        }

        #[test]
        fn test_amounts_are_non_negative(amount in amount_strategy()) {
            prop_assert!(amount >= Decimal::ZERO);
            prop_assert_eq!(amount.scale(), 2);
        }
    }

    #[test]
    fn test_fake_address_keeps_postal_code() {
        let address = fake_address("12345-678");
        assert_eq!(address.postal_code, "12345-678");
        assert!(address.city.is_some());
        assert!(!fake_customer_name().is_empty());
    }
}
