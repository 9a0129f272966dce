//! Client-side order validation
//!
//! Advisory pre-checks only; the server is authoritative. A failing
//! check aborts the submission before any request is sent. Checks run
//! in order and the last failing one wins, matching the single error
//! slot of the dashboard's quantity field.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::api::{ApiError, ApiResult};

pub const MAX_TRADE_QUANTITY: u32 = 10_000;

pub const ERR_QUANTITY_POSITIVE: &str = "Quantity must be greater than 0";
pub const ERR_QUANTITY_WHOLE: &str = "Quantity must be a whole number";
pub const ERR_QUANTITY_MAX: &str = "Quantity cannot exceed 10,000 shares";

/// Validate a requested share quantity and narrow it to the wire type
pub fn validate_quantity(quantity: Decimal) -> ApiResult<u32> {
    let mut error = None;

    if quantity <= Decimal::ZERO {
        error = Some(ERR_QUANTITY_POSITIVE);
    }
    if !quantity.fract().is_zero() {
        error = Some(ERR_QUANTITY_WHOLE);
    }
    if quantity > Decimal::from(MAX_TRADE_QUANTITY) {
        error = Some(ERR_QUANTITY_MAX);
    }

    if let Some(message) = error {
        return Err(ApiError::Validation(message.to_string()));
    }

    quantity
        .to_u32()
        .ok_or_else(|| ApiError::Validation(ERR_QUANTITY_WHOLE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn message(result: ApiResult<u32>) -> String {
        match result {
            Err(ApiError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_quantities_pass() {
        assert_eq!(validate_quantity(dec!(1)).unwrap(), 1);
        assert_eq!(validate_quantity(dec!(10)).unwrap(), 10);
        assert_eq!(validate_quantity(dec!(10000)).unwrap(), 10_000);
    }

    #[test]
    fn test_zero_fails_with_positive_message() {
        assert_eq!(message(validate_quantity(dec!(0))), ERR_QUANTITY_POSITIVE);
    }

    #[test]
    fn test_negative_fails_with_positive_message() {
        assert_eq!(message(validate_quantity(dec!(-3))), ERR_QUANTITY_POSITIVE);
    }

    #[test]
    fn test_fractional_fails_with_whole_number_message() {
        assert_eq!(message(validate_quantity(dec!(2.5))), ERR_QUANTITY_WHOLE);
    }

    #[test]
    fn test_over_limit_fails_with_max_message() {
        assert_eq!(message(validate_quantity(dec!(10001))), ERR_QUANTITY_MAX);
    }

    #[test]
    fn test_last_failing_check_wins() {
        // negative and fractional: the whole-number check runs later
        assert_eq!(message(validate_quantity(dec!(-2.5))), ERR_QUANTITY_WHOLE);
        // fractional and over the cap: the cap check runs last
        assert_eq!(message(validate_quantity(dec!(10000.5))), ERR_QUANTITY_MAX);
    }
}
