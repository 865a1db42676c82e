//! Money amounts.
//!
//! Every amount column is `NUMERIC(14, 2)`, so anything outside that range or
//! with sub-cent precision is rejected at the edge rather than rounded (or
//! overflowed) by the database.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest value a `NUMERIC(14, 2)` column holds: 999 999 999 999.99.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(amount_error("negative", "must not be negative"));
    }
    if *amount > max_amount() {
        return Err(amount_error("too_large", "must be at most 999999999999.99"));
    }
    if amount.normalize().scale() > 2 {
        return Err(amount_error("precision", "must have at most 2 decimal places"));
    }
    Ok(())
}

/// Fixes the scale at two places, matching what Postgres hands back.
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.normalize();
    cents.rescale(2);
    if cents.is_zero() {
        cents.set_sign_positive(true);
    }
    cents
}

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}
