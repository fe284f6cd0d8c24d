//! Common numeric helpers for quote calculations.
//!
//! Parsing follows the zero-fallback rule: user-entered quantities never
//! fail, they degrade to zero. Formatting helpers are used by the document
//! builder only; the calculator itself never rounds.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// The only currency glyph the product prints.
pub const CURRENCY_SYMBOL: &str = "€";

/// Longest prefix of `s` that reads as a decimal number: optional sign,
/// digits with at most one point, then an optional exponent. Anything after
/// it (a unit, a comma, a second point) is ignored.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        let fraction_end = digits_from(int_end + 1);
        // A bare trailing point adds nothing.
        if fraction_end > int_end + 1 {
            mantissa_end = fraction_end;
        }
    }
    let has_digits = mantissa_end > end;
    if !has_digits {
        return "";
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &s[..end]
}

/// Coerces free-form text to a non-negative quantity.
///
/// Only the leading number counts, so `"4 hrs"` is 4 and `"1,5"` is 1. Empty, non-numeric, negative and
/// out-of-range input all yield zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::coerce_quantity;
///
/// assert_eq!(coerce_quantity("2.5"), dec!(2.5));
/// assert_eq!(coerce_quantity("12abc"), dec!(12));
/// assert_eq!(coerce_quantity("abc"), dec!(0));
/// assert_eq!(coerce_quantity("-3"), dec!(0));
/// ```
pub fn coerce_quantity(s: &str) -> Decimal {
    let number = numeric_prefix(s.trim());
    if number.is_empty() {
        if !s.trim().is_empty() {
            tracing::debug!(input = %s, "non-numeric quantity treated as zero");
        }
        return Decimal::ZERO;
    }
    if number.len() < s.trim().len() {
        tracing::debug!(input = %s, used = %number, "ignored trailing text in quantity");
    }

    if number.starts_with('-') {
        tracing::debug!(input = %s, "negative quantity clamped to zero");
        return Decimal::ZERO;
    }
    let unsigned = number.strip_prefix('+').unwrap_or(number);
    let mut literal = if unsigned.starts_with('.') {
        format!("0{unsigned}")
    } else {
        unsigned.to_string()
    };
    literal.make_ascii_lowercase();

    let parsed = if literal.contains('e') {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };
    match parsed {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(input = %s, "quantity out of range, treated as zero: {}", e);
            Decimal::ZERO
        }
    }
}

fn round_half_up_dp(
    value: Decimal,
    places: u32,
) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_half_up_dp(value, 2)
}

/// `rounded` printed with exactly `places` decimals.
fn fixed(
    mut rounded: Decimal,
    places: u32,
) -> String {
    rounded.rescale(places);
    rounded.to_string()
}

/// Formats an amount as currency with exactly two decimals, e.g. `€2600.00`.
pub fn format_money(value: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", fixed(round_half_up(value), 2))
}

/// Formats hours with one decimal, e.g. `24.0`.
pub fn format_hours(value: Decimal) -> String {
    fixed(round_half_up_dp(value, 1), 1)
}

/// Formats a user-entered quantity without trailing zeros, e.g. `3` or `2.5`.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}
