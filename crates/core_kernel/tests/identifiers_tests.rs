//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, and display formatting.

use core_kernel::{AddressId, CustomerId, UserId};
use proptest::prelude::*;

mod customer_id_tests {
    use super::*;

    #[test]
    fn test_value_roundtrip() {
        let id = CustomerId::new(5);
        assert_eq!(id.value(), 5);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(CustomerId::prefix(), "CUS");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(CustomerId::new(17).to_string(), "CUS-17");
    }

    #[test]
    fn test_from_str_with_prefix() {
        let parsed: CustomerId = "CUS-17".parse().unwrap();
        assert_eq!(parsed, CustomerId::new(17));
    }

    #[test]
    fn test_from_str_without_prefix() {
        let parsed: CustomerId = "17".parse().unwrap();
        assert_eq!(parsed, CustomerId::new(17));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("CUS-abc".parse::<CustomerId>().is_err());
        assert!("".parse::<CustomerId>().is_err());
    }

    #[test]
    fn test_foreign_prefix_is_rejected() {
        // An address id string is not a customer id
        assert!("ADDR-3".parse::<CustomerId>().is_err());
    }

    #[test]
    fn test_json_is_a_bare_number() {
        let json = serde_json::to_string(&CustomerId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: CustomerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CustomerId::new(9));
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(CustomerId::new(1) < CustomerId::new(2));
    }
}

mod other_id_tests {
    use super::*;

    #[test]
    fn test_address_id_prefix() {
        assert_eq!(AddressId::new(1).to_string(), "ADDR-1");
    }

    #[test]
    fn test_user_id_conversion() {
        let id: UserId = 123.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 123);
    }
}

proptest! {
    #[test]
    fn prop_display_then_parse_is_identity(value in any::<i64>()) {
        let id = UserId::new(value);
        let parsed: UserId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    #[test]
    fn prop_plain_number_parses(value in 0i64..i64::MAX) {
        let parsed: AddressId = value.to_string().parse().unwrap();
        prop_assert_eq!(parsed.value(), value);
    }
}
