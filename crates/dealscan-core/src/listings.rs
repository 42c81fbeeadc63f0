//! Listing types shared between the extractor boundary, the classifier, and
//! the report stage.
//!
//! Input types ([`ListingFragments`], [`PriceFragment`], [`ScrapedListing`])
//! deserialize leniently: every field may be absent. Output types
//! ([`CanonicalListing`], [`ClassifiedListing`]) serialize to the flat
//! deal-sheet columns.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Literal written to the `% Discount` column for non-numeric discounts.
pub const SPECIAL_SENTINEL: &str = "SPECIAL";

/// Promo label rendered for listings carrying the seasonal-sale icon.
pub const SEASONAL_SALE_LABEL: &str = "BF SALE";

/// Price sub-parts located by the extractor for one price slot.
///
/// The storefront usually renders a price as separate dollar and cents
/// tokens; when those are missing a single currency-formatted string may
/// still be available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFragment {
    /// Dollar token, e.g. `"1,299"`.
    pub integer: Option<String>,
    /// Cents token, e.g. `"99"`. Defaults to `"00"` when absent.
    pub fraction: Option<String>,
    /// Fallback currency text, e.g. `"$1,299.99"`.
    pub text: Option<String>,
}

impl PriceFragment {
    /// A fragment carrying split dollar/cents tokens.
    #[must_use]
    pub fn from_split(integer: impl Into<String>, fraction: Option<&str>) -> Self {
        Self {
            integer: Some(integer.into()),
            fraction: fraction.map(str::to_owned),
            text: None,
        }
    }

    /// A fragment carrying only currency-formatted fallback text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            integer: None,
            fraction: None,
            text: Some(text.into()),
        }
    }
}

/// Everything the extractor pulled out of one product card that bears on
/// pricing and promotions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFragments {
    /// Uppercased callout badge text, e.g. `"CLEARANCE"`.
    pub badge_text: Option<String>,
    /// Free text that may contain `"Use promo code <CODE>"`.
    pub promo_banner_text: Option<String>,
    pub seasonal_icon_present: bool,
    pub clearance_icon_present: bool,
    /// Text of the label above the price block.
    pub price_label_text: Option<String>,
    /// Standalone recommended-retail-price text.
    pub rrp_text: Option<String>,
    pub special_price_fragment: Option<PriceFragment>,
    pub main_price_fragment: Option<PriceFragment>,
}

/// Where a listing's promotion code came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoSource {
    /// Callout badge text, used verbatim.
    Badge(String),
    /// Code lifted from a `"Use promo code <CODE>"` banner, uppercased.
    BannerCode(String),
    /// Seasonal-sale icon with no explicit code.
    SeasonalSale,
}

impl PromoSource {
    /// The string written to the `PromoCode` column.
    #[must_use]
    pub fn as_code(&self) -> &str {
        match self {
            PromoSource::Badge(text) | PromoSource::BannerCode(text) => text,
            PromoSource::SeasonalSale => SEASONAL_SALE_LABEL,
        }
    }
}

impl std::fmt::Display for PromoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl Serialize for PromoSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

/// Percentage-off value: either a computed percentage or the `SPECIAL`
/// sentinel for named promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentOff {
    /// Percentage in `[0, 100]`, rounded to two decimal places.
    Percent(Decimal),
    Special,
}

impl PercentOff {
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, PercentOff::Special)
    }

    /// The numeric percentage, or `None` for [`PercentOff::Special`].
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            PercentOff::Percent(value) => Some(*value),
            PercentOff::Special => None,
        }
    }
}

impl std::fmt::Display for PercentOff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentOff::Percent(value) => write!(f, "{value}"),
            PercentOff::Special => f.write_str(SPECIAL_SENTINEL),
        }
    }
}

impl Serialize for PercentOff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PercentOff::Percent(value) => rust_decimal::serde::float::serialize(value, serializer),
            PercentOff::Special => serializer.serialize_str(SPECIAL_SENTINEL),
        }
    }
}

/// Classification flags derived while resolving a listing. Not written to
/// the deal sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFlags {
    /// The price label announced a "Special price".
    pub is_special_price: bool,
    /// Clearance icon with no original price to compare against.
    pub is_non_promo_clearance: bool,
    /// Only one price is shown, so no percentage can be derived.
    pub is_single_price_clearance: bool,
}

/// The canonical pricing record derived from one listing.
///
/// Prices and numeric percentages serialize as JSON numbers so they are
/// distinguishable by type from the `"SPECIAL"` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalListing {
    #[serde(rename = "Original Price", with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    #[serde(rename = "Discount Price", with = "rust_decimal::serde::float_option")]
    pub discount_price: Option<Decimal>,
    #[serde(rename = "% Discount")]
    pub percent_off: Option<PercentOff>,
    #[serde(rename = "PromoCode")]
    pub promo: Option<PromoSource>,
    #[serde(skip)]
    pub flags: ListingFlags,
}

impl CanonicalListing {
    /// Rendered promotion code, if any.
    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo.as_ref().map(PromoSource::as_code)
    }
}

/// One product card as handed over by the extractor: identity fields that
/// pass straight through, plus the pricing fragments to classify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedListing {
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub link: Option<String>,
    pub fragments: ListingFragments,
}

/// A classified listing in deal-sheet column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedListing {
    #[serde(rename = "Product name")]
    pub name: Option<String>,
    #[serde(rename = "Part Number")]
    pub part_number: Option<String>,
    #[serde(flatten)]
    pub pricing: CanonicalListing,
    #[serde(rename = "Link")]
    pub link: Option<String>,
}
