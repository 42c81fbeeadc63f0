//! Currency parsing for listing price text and split dollar/cents tokens.
//!
//! Every function here is total: text that does not hold a price yields
//! `None` rather than an error. See [`crate::classify`] for how these
//! compose into listing classification.

use std::sync::LazyLock;

use dealscan_core::PriceFragment;
use regex::Regex;
use rust_decimal::Decimal;

/// `$` followed by digit groups and an optional 1-2 digit fraction.
static SYMBOL_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").expect("valid regex")
});

/// The same amount shape without a currency symbol. Must not follow a word
/// character, `.` or `$`, so codes like `ABC123` and the cents of `$.99`
/// are not read as whole-dollar prices.
static BARE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w.$])([0-9][0-9,]*(?:\.[0-9]{1,2})?)").expect("valid regex")
});

/// Parses the first currency amount found in `text`.
///
/// Non-breaking spaces are normalized first and thousands separators are
/// stripped. An amount preceded by `$` wins over a bare number appearing
/// earlier in the text, so `"With promo code SAVE10 $89.00"` yields `89.00`.
///
/// Returns `None` when no amount is present.
#[must_use]
pub fn parse_currency_text(text: &str) -> Option<Decimal> {
    let normalized = text.replace('\u{a0}', " ");
    let captures = SYMBOL_AMOUNT
        .captures(&normalized)
        .or_else(|| BARE_AMOUNT.captures(&normalized))?;
    let digits = captures.get(1)?.as_str().replace(',', "");

    match digits.parse::<Decimal>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            tracing::debug!(text, error = %e, "currency amount did not parse");
            None
        }
    }
}

/// Combines split dollar and cents tokens into an amount.
///
/// Non-digit characters are stripped from both parts. A missing or empty
/// fraction reads as `"00"`; a one-digit fraction is right-padded (`"5"` is
/// fifty cents) and anything past two digits is truncated, never rounded, so
/// `"999"` reads as `99` cents.
///
/// Returns `None` when the integer part has no digits.
#[must_use]
pub fn parse_split_fragment(integer_text: &str, fraction_text: Option<&str>) -> Option<Decimal> {
    let integer = digits_only(integer_text);
    if integer.is_empty() {
        return None;
    }

    let mut fraction = fraction_text.map(digits_only).unwrap_or_default();
    if fraction.is_empty() {
        fraction.push_str("00");
    }
    while fraction.len() < 2 {
        fraction.push('0');
    }
    fraction.truncate(2);

    let combined = format!("{integer}.{fraction}");
    match combined.parse::<Decimal>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            tracing::debug!(integer_text, error = %e, "split price did not parse");
            None
        }
    }
}

/// Parses whichever representation a [`PriceFragment`] carries.
///
/// Split tokens are tried first; the fallback text is consulted when there
/// is no integer token or the split tokens hold no price.
#[must_use]
pub fn parse_price_fragment(fragment: Option<&PriceFragment>) -> Option<Decimal> {
    let fragment = fragment?;
    fragment
        .integer
        .as_deref()
        .and_then(|integer| parse_split_fragment(integer, fragment.fraction.as_deref()))
        .or_else(|| fragment.text.as_deref().and_then(parse_currency_text))
}

fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
