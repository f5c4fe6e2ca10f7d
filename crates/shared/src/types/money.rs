//! Currency helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary amounts are `rust_decimal::Decimal` rounded to cents.

use rust_decimal::Decimal;

/// Number of decimal places carried by monetary amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to currency precision (2 decimal places, banker's
/// rounding as provided by `Decimal::round_dp`).
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp(CURRENCY_SCALE)
}

/// Formats an amount as a US dollar string, e.g. `$175.00` or `-$25.50`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    if rounded.is_sign_negative() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${rounded:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(dec!(10.005)), dec!(10.00));
        assert_eq!(round_currency(dec!(10.015)), dec!(10.02));
        assert_eq!(round_currency(dec!(175)), dec!(175));
    }

    #[test]
    fn test_round_preserves_negative() {
        assert_eq!(round_currency(dec!(-25.004)), dec!(-25.00));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(175)), "$175.00");
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(12.5)), "$12.50");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(dec!(-25.5)), "-$25.50");
    }
}
