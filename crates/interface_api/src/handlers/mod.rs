//! Request handlers

pub mod customer;
pub mod user;
pub mod health;

use std::num::ParseIntError;
use std::str::FromStr;

use core_kernel::CoreError;

use crate::error::ApiError;

/// Parses a path identifier, accepting both `42` and `CUS-42` forms
pub(crate) fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse::<T>()
        .map_err(|e| CoreError::invalid_identifier(format!("'{}': {}", raw, e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CustomerId;

    #[test]
    fn test_parse_id_accepts_plain_and_prefixed() {
        assert_eq!(parse_id::<CustomerId>("42").unwrap(), CustomerId::new(42));
        assert_eq!(parse_id::<CustomerId>("CUS-42").unwrap(), CustomerId::new(42));
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id::<CustomerId>("abc").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
