//! Batch classification of extracted listings.
//!
//! Listings are classified independently and in input order. Identity fields
//! (name, part number, link) pass through untouched.

use dealscan_core::{ClassifiedListing, PercentOff, ScrapedListing};

use crate::classify::classify;
use crate::error::ScraperError;

/// Counts of how a batch of listings was classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    /// Listings with a computed percentage off.
    pub discounted: usize,
    /// Listings carrying the `SPECIAL` sentinel.
    pub special: usize,
    /// Listings with no discount price at all.
    pub unpriced: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn from_listings(listings: &[ClassifiedListing]) -> Self {
        listings
            .iter()
            .fold(Self::default(), |mut summary, listing| {
                summary.total += 1;
                match listing.pricing.percent_off {
                    Some(PercentOff::Special) => summary.special += 1,
                    Some(PercentOff::Percent(_)) => summary.discounted += 1,
                    None => {}
                }
                if listing.pricing.discount_price.is_none() {
                    summary.unpriced += 1;
                }
                summary
            })
    }
}

/// Classifies one extracted listing.
///
/// An empty product name is normalized to `None`; the listing is still
/// classified and returned.
#[must_use]
pub fn classify_listing(listing: ScrapedListing) -> ClassifiedListing {
    let pricing = classify(&listing.fragments);
    let name = listing.name.filter(|n| !n.trim().is_empty());
    tracing::debug!(
        name = name.as_deref().unwrap_or("<unnamed>"),
        original = ?pricing.original_price,
        discount = ?pricing.discount_price,
        percent_off = ?pricing.percent_off,
        "classified listing"
    );

    ClassifiedListing {
        name,
        part_number: listing.part_number,
        pricing,
        link: listing.link,
    }
}

/// Classifies every listing, preserving input order.
#[must_use]
pub fn classify_all(listings: Vec<ScrapedListing>) -> Vec<ClassifiedListing> {
    let classified: Vec<ClassifiedListing> =
        listings.into_iter().map(classify_listing).collect();

    let summary = BatchSummary::from_listings(&classified);
    tracing::info!(
        total = summary.total,
        discounted = summary.discounted,
        special = summary.special,
        unpriced = summary.unpriced,
        "classified listing batch"
    );
    if summary.total > 0 && summary.unpriced == summary.total {
        tracing::warn!(
            total = summary.total,
            "no listing in the batch had a price; check the extractor"
        );
    }

    classified
}

/// Decodes a JSON array of extracted listings.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] if `json` is not an array of
/// listing objects.
pub fn decode_listings(json: &str) -> Result<Vec<ScrapedListing>, ScraperError> {
    serde_json::from_str(json).map_err(|source| ScraperError::Deserialize {
        context: "extracted listings".to_string(),
        source,
    })
}
