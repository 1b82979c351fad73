//! Amount parsing at the console boundary

use std::str::FromStr;

use rust_decimal::Decimal;

use super::result::{Error, Result};

/// Largest magnitude a `DECIMAL(18, 2)` balance column holds
pub fn max_ledger_amount() -> Decimal {
    Decimal::new(999_999_999_999_999_999, 2)
}

/// True when `value` fits the balance column
pub fn within_ledger_range(value: Decimal) -> bool {
    value.abs() <= max_ledger_amount()
}

/// Parse a user-typed money amount.
///
/// Accepts plain (`50`, `20.5`) and scientific (`1e2`) notation, surrounding
/// whitespace is ignored, and the value is rounded to cents. The sign is kept
/// as typed: a negative deposit is accepted here. Values the balance column
/// cannot hold are rejected like unparseable ones.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(|amount| amount.round_dp(2))
        .ok()
        .filter(|amount| within_ledger_range(*amount))
        .ok_or_else(|| Error::InvalidAmount(trimmed.to_string()))
}
