//! Price and promotion classification for a single listing.
//!
//! A listing card never says outright which of its prices is the original
//! and which is the selling price. [`classify`] infers that from the price
//! label, the badge, the promo banner, and the promotion icons:
//!
//! 1. resolve the promotion code ([`resolve_promo`]),
//! 2. run the ordered [`PRICE_RULES`] over a [`ResolvedPrices`] accumulator,
//! 3. derive [`ListingFlags`],
//! 4. compute the percentage off.
//!
//! Classification is total and stateless: every input yields exactly one
//! [`CanonicalListing`] and no listing depends on another.

use std::sync::LazyLock;

use dealscan_core::{CanonicalListing, ListingFlags, ListingFragments, PercentOff, PromoSource};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::parse::{parse_currency_text, parse_price_fragment};

static PROMO_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Use promo code ([\w\d]+)").expect("valid regex"));

/// What the label above the price block announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLabel {
    /// `"Special price"`: the shown price is a named promotional price.
    SpecialPrice,
    /// `"Without promo code $X"`: the label carries the original price.
    WithoutPromoCode,
    /// `"With promo code $X"`: the label carries the discounted price.
    WithPromoCode,
    /// Absent, empty, or any other text.
    Unrecognized,
}

/// Label phrases in match order. `"Without promo code"` must be tested
/// before `"With promo code"`.
const LABEL_PHRASES: &[(&str, PriceLabel)] = &[
    ("Special price", PriceLabel::SpecialPrice),
    ("Without promo code", PriceLabel::WithoutPromoCode),
    ("With promo code", PriceLabel::WithPromoCode),
];

impl PriceLabel {
    /// Classifies label text by case-sensitive phrase containment.
    #[must_use]
    pub fn from_text(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return PriceLabel::Unrecognized;
        };
        LABEL_PHRASES
            .iter()
            .find(|(phrase, _)| text.contains(phrase))
            .map_or(PriceLabel::Unrecognized, |(_, label)| *label)
    }
}

/// Accumulator threaded through [`PRICE_RULES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedPrices {
    pub original: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub is_special_price: bool,
}

/// One step of price resolution. A rule inspects the label and fills in the
/// parts of the accumulator it is responsible for.
type PriceRule = fn(&ListingFragments, PriceLabel, &mut ResolvedPrices);

/// Price rules in application order.
const PRICE_RULES: &[(&str, PriceRule)] = &[
    ("special-price", special_price_rule),
    ("without-promo-code", without_promo_code_rule),
    ("rrp", rrp_rule),
    ("with-promo-code", with_promo_code_rule),
    ("main-price-fallback", main_price_fallback_rule),
];

fn special_price_rule(fragments: &ListingFragments, label: PriceLabel, acc: &mut ResolvedPrices) {
    if label == PriceLabel::SpecialPrice {
        acc.is_special_price = true;
        acc.discount = parse_price_fragment(fragments.special_price_fragment.as_ref());
    }
}

fn without_promo_code_rule(
    fragments: &ListingFragments,
    label: PriceLabel,
    acc: &mut ResolvedPrices,
) {
    if label == PriceLabel::WithoutPromoCode {
        acc.original = fragments
            .price_label_text
            .as_deref()
            .and_then(parse_currency_text);
        acc.discount = parse_price_fragment(fragments.main_price_fragment.as_ref());
    }
}

/// The standalone RRP element only appears when the label is not one of the
/// self-describing "Special price" / "Without promo code" forms.
fn rrp_rule(fragments: &ListingFragments, label: PriceLabel, acc: &mut ResolvedPrices) {
    if matches!(label, PriceLabel::WithPromoCode | PriceLabel::Unrecognized) {
        if let Some(rrp) = fragments.rrp_text.as_deref() {
            acc.original = parse_currency_text(rrp);
        }
    }
}

fn with_promo_code_rule(fragments: &ListingFragments, label: PriceLabel, acc: &mut ResolvedPrices) {
    if label == PriceLabel::WithPromoCode {
        acc.discount = fragments
            .price_label_text
            .as_deref()
            .and_then(parse_currency_text);
        if acc.original.is_none() {
            acc.original = parse_price_fragment(fragments.main_price_fragment.as_ref());
        }
    }
}

fn main_price_fallback_rule(
    fragments: &ListingFragments,
    label: PriceLabel,
    acc: &mut ResolvedPrices,
) {
    if label != PriceLabel::SpecialPrice && acc.discount.is_none() {
        acc.discount = parse_price_fragment(fragments.main_price_fragment.as_ref());
    }
}

/// Returns the badge text when it carries anything besides whitespace.
fn badge(fragments: &ListingFragments) -> Option<&str> {
    fragments
        .badge_text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Resolves the promotion code: badge, then banner code, then the seasonal
/// sale icon.
#[must_use]
pub fn resolve_promo(fragments: &ListingFragments) -> Option<PromoSource> {
    if let Some(text) = badge(fragments) {
        return Some(PromoSource::Badge(text.to_owned()));
    }

    let banner_code = fragments
        .promo_banner_text
        .as_deref()
        .and_then(|banner| PROMO_CODE.captures(banner))
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_uppercase()));
    if let Some(code) = banner_code {
        return Some(PromoSource::BannerCode(code));
    }

    fragments
        .seasonal_icon_present
        .then_some(PromoSource::SeasonalSale)
}

/// Resolves original and discount prices by applying [`PRICE_RULES`] in order.
#[must_use]
pub fn resolve_prices(fragments: &ListingFragments, label: PriceLabel) -> ResolvedPrices {
    let mut acc = ResolvedPrices::default();
    for (name, rule) in PRICE_RULES {
        rule(fragments, label, &mut acc);
        tracing::trace!(rule = name, ?acc, "applied price rule");
    }
    acc
}

/// Derives classification flags from the badge, the clearance icon, and the
/// resolved prices.
#[must_use]
pub fn resolve_flags(fragments: &ListingFragments, prices: &ResolvedPrices) -> ListingFlags {
    let mut flags = ListingFlags {
        is_special_price: prices.is_special_price,
        ..ListingFlags::default()
    };

    if badge(fragments).is_some() && prices.original.is_none() && prices.discount.is_some() {
        flags.is_single_price_clearance = true;
    }
    if flags.is_special_price {
        flags.is_single_price_clearance = true;
    }
    if fragments.clearance_icon_present && prices.original.is_none() && !flags.is_special_price {
        flags.is_non_promo_clearance = true;
        flags.is_single_price_clearance = true;
    }

    flags
}

/// Computes the percentage off, or the `SPECIAL` sentinel for named
/// promotions and single-price clearance.
#[must_use]
pub fn resolve_percent_off(prices: &ResolvedPrices, flags: ListingFlags) -> Option<PercentOff> {
    if flags.is_special_price || flags.is_non_promo_clearance {
        return Some(PercentOff::Special);
    }
    if flags.is_single_price_clearance {
        return None;
    }

    match (prices.original, prices.discount) {
        (Some(original), Some(discount)) if original > discount => {
            percent_between(original, discount).map(PercentOff::Percent)
        }
        _ => None,
    }
}

/// `(1 - discount / original) * 100`, rounded half-to-even at two places.
fn percent_between(original: Decimal, discount: Decimal) -> Option<Decimal> {
    let ratio = discount.checked_div(original)?;
    let percent = (Decimal::ONE - ratio).checked_mul(Decimal::ONE_HUNDRED)?;
    Some(percent.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
}

/// Classifies one listing into its canonical pricing record.
#[must_use]
pub fn classify(fragments: &ListingFragments) -> CanonicalListing {
    let promo = resolve_promo(fragments);
    let label = PriceLabel::from_text(fragments.price_label_text.as_deref());
    if label == PriceLabel::Unrecognized {
        if let Some(text) = fragments.price_label_text.as_deref().filter(|t| !t.is_empty()) {
            tracing::debug!(label = text, "unrecognized price label");
        }
    }

    let prices = resolve_prices(fragments, label);
    let flags = resolve_flags(fragments, &prices);
    let percent_off = resolve_percent_off(&prices, flags);

    CanonicalListing {
        original_price: prices.original,
        discount_price: prices.discount,
        percent_off,
        promo,
        flags,
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
