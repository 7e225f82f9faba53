//! Money helpers with decimal precision and cent rounding.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Monetary values cross API boundaries as decimal strings with exactly two
//! fraction digits; internally they are `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fraction digits carried by monetary values.
pub const CENT_SCALE: u32 = 2;

/// Errors from parsing monetary strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The string is not a decimal number.
    #[error("Malformed amount: {0}")]
    Malformed(String),

    /// The string carries more than two fraction digits.
    #[error("Amount has more than two fraction digits: {0}")]
    TooManyFractionDigits(String),
}

/// Rounds a value to cents (two fraction digits, half away from zero).
///
/// All monetary accumulation rounds to cents after each addition to avoid
/// drift from sub-cent intermediate values.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a monetary string with at most two fraction digits.
///
/// The result is rescaled to exactly two fraction digits.
///
/// # Errors
///
/// Returns `MoneyError::Malformed` for non-numeric input and
/// `MoneyError::TooManyFractionDigits` when the input is more precise than
/// cents.
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    let mut value: Decimal = trimmed
        .parse()
        .map_err(|_| MoneyError::Malformed(trimmed.to_string()))?;

    if value.scale() > CENT_SCALE {
        return Err(MoneyError::TooManyFractionDigits(trimmed.to_string()));
    }

    value.rescale(CENT_SCALE);
    Ok(value)
}

/// Formats a value as a decimal string with exactly two fraction digits.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(CENT_SCALE);
    rounded.to_string()
}
