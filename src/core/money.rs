//! Amount parsing and display.
//!
//! Amounts are whole pesos entered with `.` as the thousands separator
//! (`1.500.000`). Display mirrors that format. Progress bars clamp their
//! fill to `[0, 100]` but always print the raw percentage.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Formats a non-negative integer with `.` between thousands groups.
///
/// `1500000` becomes `"1.500.000"`, `999` stays `"999"`.
#[must_use]
pub fn format_with_dots(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Extracts the integer from user text by keeping only its digits.
///
/// Empty input (or input without digits) parses as `0`.
///
/// # Errors
/// Returns [`Error::Validation`] when the digits do not fit in a `u64`.
pub fn parse_formatted_amount(text: &str) -> Result<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse().map_err(|_| Error::Validation {
        message: format!("'{text}' is too large to be an amount"),
    })
}

/// Parses user text into a strictly positive amount.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for zero or negative input and
/// [`Error::Validation`] for overflowing input.
pub fn parse_positive_amount(text: &str) -> Result<Decimal> {
    let value = Decimal::from(parse_formatted_amount(text)?);
    if text.trim_start().starts_with('-') {
        return Err(Error::InvalidAmount { amount: -value });
    }
    ensure_positive(value)?;
    Ok(value)
}

/// Largest amount the store keeps exactly. Money columns are REAL on
/// `SQLite`, so integers above 2^53 - 1 would be silently rounded.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xFFFF_FFFF, 0x001F_FFFF, 0, false, 0);

/// Rejects amounts that are not strictly positive or too large to store.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] when `amount <= 0` and
/// [`Error::Validation`] when `amount > MAX_AMOUNT`.
pub fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }
    if amount > MAX_AMOUNT {
        return Err(Error::Validation {
            message: format!("{amount} is larger than the maximum of {MAX_AMOUNT}"),
        });
    }
    Ok(())
}

/// Formats an amount as whole pesos, e.g. `"$ 1.500.000"` or `"-$ 25.000"`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let body = rounded
        .abs()
        .to_u64()
        .map_or_else(|| rounded.abs().to_string(), format_with_dots);
    format!("{sign}$ {body}")
}

/// Formats a percentage with one decimal, e.g. `"19.0%"`.
#[must_use]
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.1}%", percent.round_dp(1))
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`. The fill is
/// clamped to `[0, 100]`; the printed percentage is the raw value.
#[must_use]
pub fn format_progress_bar(percent: Decimal, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    let filled = (clamped * Decimal::from(length) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(length);
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {}",
        "█".repeat(filled),
        "░".repeat(empty),
        format_percent(percent)
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_with_dots() {
        assert_eq!(format_with_dots(0), "0");
        assert_eq!(format_with_dots(999), "999");
        assert_eq!(format_with_dots(1000), "1.000");
        assert_eq!(format_with_dots(1_500_000), "1.500.000");
        assert_eq!(format_with_dots(12_345_678), "12.345.678");
    }

    #[test]
    fn test_format_then_parse_roundtrips() {
        let samples = [
            0,
            7,
            999,
            1_000,
            65_536,
            1_050_000,
            987_654_321,
            u64::from(u32::MAX),
            u64::MAX,
        ];
        for n in samples {
            assert_eq!(parse_formatted_amount(&format_with_dots(n)).unwrap(), n);
        }
    }

    #[test]
    fn test_parse_formatted_amount_strips_noise() {
        assert_eq!(parse_formatted_amount("$ 1.500.000").unwrap(), 1_500_000);
        assert_eq!(parse_formatted_amount("20,000 COP").unwrap(), 20_000);
        assert_eq!(parse_formatted_amount("").unwrap(), 0);
        assert_eq!(parse_formatted_amount("abc").unwrap(), 0);
    }

    #[test]
    fn test_parse_formatted_amount_overflow() {
        let err = parse_formatted_amount("99999999999999999999999").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_amounts_beyond_exact_storage_are_rejected() {
        assert_eq!(MAX_AMOUNT, dec!(9007199254740991));
        assert_eq!(
            parse_positive_amount("9.007.199.254.740.991").unwrap(),
            MAX_AMOUNT
        );
        assert!(matches!(
            parse_positive_amount("9.007.199.254.740.993").unwrap_err(),
            Error::Validation { .. }
        ));
        assert!(matches!(
            ensure_positive(MAX_AMOUNT + Decimal::ONE).unwrap_err(),
            Error::Validation { .. }
        ));
    }

    #[test]
    fn test_parse_positive_amount() {
        assert_eq!(parse_positive_amount("1.500").unwrap(), dec!(1500));
        assert!(matches!(
            parse_positive_amount("0").unwrap_err(),
            Error::InvalidAmount { .. }
        ));
        assert!(matches!(
            parse_positive_amount("").unwrap_err(),
            Error::InvalidAmount { .. }
        ));
        assert!(matches!(
            parse_positive_amount("-5.000").unwrap_err(),
            Error::InvalidAmount { amount } if amount == dec!(-5000)
        ));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(1500000)), "$ 1.500.000");
        assert_eq!(format_money(dec!(0)), "$ 0");
        assert_eq!(format_money(dec!(-25000)), "-$ 25.000");
        assert_eq!(format_money(dec!(999.5)), "$ 1.000");
        assert_eq!(format_money(dec!(-0.2)), "$ 0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(19.047619)), "19.0%");
        assert_eq!(format_percent(dec!(150)), "150.0%");
    }

    #[test]
    fn test_progress_bar_clamps_fill_but_shows_raw_value() {
        assert_eq!(format_progress_bar(dec!(50), Some(10)), "[█████░░░░░] 50.0%");
        assert_eq!(format_progress_bar(dec!(0), Some(4)), "[░░░░] 0.0%");
        assert_eq!(
            format_progress_bar(dec!(150), Some(10)),
            "[██████████] 150.0%"
        );
        assert_eq!(format_progress_bar(dec!(-20), Some(5)), "[░░░░░] -20.0%");
    }
}
