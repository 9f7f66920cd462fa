//! Decimal-string handling.
//!
//! Every numeric string the editor displays or stores goes through
//! [`fit_number`]. Arithmetic (totals, comparisons) goes through
//! [`rust_decimal::Decimal`] so no value is ever routed through binary floats.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits of a money amount (base charge, extra charge value).
pub const MONEY_DIGITS: usize = 2;

/// Fractional digits of a weight bound.
pub const WEIGHT_DIGITS: usize = 3;

/// Whether [`fit_number`] renders a sign in front of the magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMode {
    /// Magnitude only; any sign in the input is dropped.
    Unsigned,
    /// Explicit `-` wins, then explicit `+`, then `+` for a nonzero result.
    Signed,
}

/// Canonical zero for the given fractional digit count: `"0.00"`, `"0.000"`.
pub fn zero_string(digits: usize) -> String {
    if digits == 0 {
        return "0".to_string();
    }
    format!("0.{}", "0".repeat(digits))
}

/// Fit a raw string to a fixed-point decimal string.
///
/// Sign characters are stripped wherever they occur, the remaining text is
/// split on its decimal point and re-rendered with exactly `digits`
/// fractional digits, widened when the input already carried more.
/// Anything that is not digits around at most one point yields
/// [`zero_string`]. Never rounds.
pub fn fit_number(raw: &str, digits: usize, sign: SignMode) -> String {
    let text = raw.trim();
    let has_plus = text.contains('+');
    let has_minus = text.contains('-');
    let body: String = text.chars().filter(|c| !matches!(c, '+' | '-')).collect();

    let Some((int_part, frac_part)) = split_digits(&body) else {
        return zero_string(digits);
    };

    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let width = digits.max(frac_part.len());

    let mut rendered = String::with_capacity(int_part.len() + width + 2);
    rendered.push_str(int_part);
    if width > 0 {
        rendered.push('.');
        rendered.push_str(frac_part);
        rendered.extend(std::iter::repeat_n('0', width - frac_part.len()));
    }

    if sign == SignMode::Unsigned {
        return rendered;
    }

    let nonzero = rendered.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let prefix = if has_minus {
        "-"
    } else if has_plus || nonzero {
        "+"
    } else {
        ""
    };

    format!("{prefix}{rendered}")
}

/// Split `digits[.digits]` into its integer and fraction parts.
fn split_digits(body: &str) -> Option<(&str, &str)> {
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if all_digits(int_part) && all_digits(frac_part) {
        Some((int_part, frac_part))
    } else {
        None
    }
}

/// Strictly parse a decimal literal: optional sign, digits, at most one point.
///
/// Returns `None` for empty text, stray characters or values that do not fit
/// a [`Decimal`].
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (int_part, frac_part) = split_digits(body)?;
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let canonical = format!(
        "{}.{}",
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part }
    );
    let value = Decimal::from_str(&canonical).ok()?;
    Some(if negative { -value } else { value })
}

/// Result of reading a form field as a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reading {
    Empty,
    NotANumber,
    Number(Decimal),
}

impl Reading {
    pub fn of(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Reading::Empty;
        }
        match parse_decimal(raw) {
            Some(value) => Reading::Number(value),
            None => Reading::NotANumber,
        }
    }

    pub fn number(self) -> Option<Decimal> {
        match self {
            Reading::Number(value) => Some(value),
            _ => None,
        }
    }
}

/// Exact sum of two decimal literals, rendered without trailing zeros.
///
/// Falls back to `x` as given (or `"0"` when `x` is blank) if either side
/// does not parse or the sum overflows.
pub fn safe_sum(x: &str, y: &str) -> String {
    let sum = parse_decimal(x)
        .zip(parse_decimal(y))
        .and_then(|(a, b)| a.checked_add(b));

    match sum {
        Some(total) => {
            let total = total.normalize();
            if total.is_zero() {
                "0".to_string()
            } else {
                total.to_string()
            }
        }
        None => {
            let x = x.trim();
            if x.is_empty() {
                "0".to_string()
            } else {
                x.to_string()
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fit_number_is_idempotent(raw in "[+-]?[0-9]{0,6}(\\.[0-9]{0,5})?", digits in 0usize..5) {
            for mode in [SignMode::Unsigned, SignMode::Signed] {
                let once = fit_number(&raw, digits, mode);
                prop_assert_eq!(fit_number(&once, digits, mode), once);
            }
        }

        #[test]
        fn fit_number_keeps_magnitude(int in "[0-9]{0,6}", frac in "[0-9]{0,5}", digits in 1usize..5) {
            let raw = format!("{int}.{frac}");
            let fitted = fit_number(&raw, digits, SignMode::Unsigned);

            let (_, fitted_frac) = fitted.split_once('.').unwrap();
            prop_assert_eq!(fitted_frac.len(), digits.max(frac.len()));

            let expected = parse_decimal(&format!(
                "{}.{}",
                if int.is_empty() { "0" } else { int.as_str() },
                if frac.is_empty() { "0" } else { frac.as_str() }
            ));
            prop_assert_eq!(parse_decimal(&fitted), expected);
        }
    }
}
