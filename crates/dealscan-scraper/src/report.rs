//! Report payload for the browsable deal sheet.
//!
//! Turns classified listings into display-ready rows: tax-inclusive and
//! ex-tax prices, a sortable percentage, category tags, and the filter
//! flags the front end keys on. Rendering the page itself happens elsewhere.

use std::collections::BTreeSet;

use dealscan_core::{detect_categories, ClassifiedListing, PercentOff, SPECIAL_SENTINEL};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// One display row of the deal sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub part_number: String,
    pub link: String,
    pub promo_code: String,
    pub original_inc: String,
    pub original_ex: String,
    pub discount_inc: String,
    pub discount_ex: String,
    /// `"SPECIAL"`, a formatted percentage, or empty when unknown.
    pub percent_text: String,
    /// Sort key for the percentage column; `SPECIAL` sorts as 100.
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_value: Decimal,
    /// Sort key for the price column: ex-tax discount price, else ex-tax
    /// original price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_value: Decimal,
    pub categories: Vec<&'static str>,
    pub has_original: bool,
    pub is_special: bool,
    /// Neither a special nor a known original price or percentage.
    pub is_unknown: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPayload {
    pub rows: Vec<ReportRow>,
    /// Distinct promotion codes across `rows`, sorted, for the filter bar.
    pub promo_codes: Vec<String>,
}

/// Builds the report payload. Listings whose price went up (negative
/// percentage) are left out.
#[must_use]
pub fn build_report(listings: &[ClassifiedListing], gst_rate: Decimal) -> ReportPayload {
    let rows: Vec<ReportRow> = listings
        .iter()
        .filter_map(|listing| build_row(listing, gst_rate))
        .collect();

    let dropped = listings.len() - rows.len();
    tracing::info!(rows = rows.len(), dropped, "built deal report");

    let promo_codes = rows
        .iter()
        .filter(|row| !row.promo_code.is_empty())
        .map(|row| row.promo_code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    ReportPayload { rows, promo_codes }
}

fn build_row(listing: &ClassifiedListing, gst_rate: Decimal) -> Option<ReportRow> {
    let pricing = &listing.pricing;
    let percent = report_percent(listing);
    if percent.is_some_and(|p| p < Decimal::ZERO) {
        tracing::debug!(
            name = listing.name.as_deref().unwrap_or("<unnamed>"),
            "dropping listing whose price increased"
        );
        return None;
    }

    let original_ex = pricing.original_price.and_then(|p| p.checked_div(gst_rate));
    let discount_ex = pricing.discount_price.and_then(|p| p.checked_div(gst_rate));

    let is_special = pricing.percent_off.is_some_and(|p| p.is_special());
    let has_original = original_ex.is_some();
    let percent_text = if is_special {
        SPECIAL_SENTINEL.to_string()
    } else {
        percent.map(format_percent).unwrap_or_default()
    };

    Some(ReportRow {
        name: listing.name.clone().unwrap_or_default(),
        part_number: listing.part_number.clone().unwrap_or_default(),
        link: listing.link.clone().unwrap_or_default(),
        promo_code: pricing.promo_code().unwrap_or_default().to_string(),
        original_inc: format_price(pricing.original_price),
        original_ex: format_price(original_ex),
        discount_inc: format_price(pricing.discount_price),
        discount_ex: format_price(discount_ex),
        percent_text,
        percent_value: percent.map_or(Decimal::ZERO, round_cents),
        price_value: discount_ex.or(original_ex).map_or(Decimal::ZERO, round_cents),
        categories: detect_categories(listing.name.as_deref()),
        has_original,
        is_special,
        is_unknown: !is_special && !has_original && pricing.percent_off.is_none(),
    })
}

/// Percentage used for sorting and filtering the report.
///
/// `SPECIAL` counts as 100. Otherwise the saving is recomputed from the two
/// prices whenever both are known, which may be zero or negative; the tax
/// rate cancels out so tax-inclusive prices are used directly.
#[must_use]
pub fn report_percent(listing: &ClassifiedListing) -> Option<Decimal> {
    let pricing = &listing.pricing;
    if let Some(PercentOff::Special) = pricing.percent_off {
        return Some(Decimal::ONE_HUNDRED);
    }
    match (pricing.original_price, pricing.discount_price) {
        (Some(original), Some(discount)) if original > Decimal::ZERO => (original - discount)
            .checked_div(original)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
        _ => pricing.percent_off.and_then(|p| p.as_decimal()),
    }
}

/// Formats an amount as `$1,234.56`; `None` formats as an empty string.
#[must_use]
pub fn format_price(amount: Option<Decimal>) -> String {
    let Some(amount) = amount else {
        return String::new();
    };
    let fixed = round_cents(amount).to_string();
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, cents) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a percentage as `25%` when it is within 0.001 of a whole number,
/// otherwise with two decimals, e.g. `25.37%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let whole = value.trunc();
    if (value - whole).abs() < Decimal::new(1, 3) {
        format!("{}%", whole.normalize())
    } else {
        format!("{}%", round_cents(value))
    }
}

/// Rounds half-to-even to exactly two decimal places.
fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
