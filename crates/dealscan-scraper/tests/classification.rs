//! End-to-end classification through the public API: worked scenarios,
//! property sweeps over fragment combinations, and JSON in/out.

use dealscan_core::{ListingFragments, PercentOff, PriceFragment, ScrapedListing};
use dealscan_scraper::{classify, classify_all, decode_listings, parse_split_fragment};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// A spread of fragment combinations covering every label branch with and
/// without badges, icons, RRP text, and price fragments.
fn fragment_matrix() -> Vec<ListingFragments> {
    let labels = [
        None,
        Some("Special price"),
        Some("Without promo code $199.99"),
        Some("With promo code $89.00"),
        Some("With promo code"),
        Some("Members only"),
    ];
    let rrps = [None, Some("$120.00"), Some("$50.00"), Some("n/a")];
    let mains = [
        None,
        Some(PriceFragment::from_split("99", Some("95"))),
        Some(PriceFragment::from_text("$150.00")),
        Some(PriceFragment::from_split("", None)),
    ];

    let mut out = Vec::new();
    for label in labels {
        for rrp in rrps {
            for main in &mains {
                for (badge, clearance) in [(None, false), (Some("CLEARANCE"), false), (None, true)] {
                    out.push(ListingFragments {
                        badge_text: badge.map(str::to_owned),
                        promo_banner_text: None,
                        seasonal_icon_present: false,
                        clearance_icon_present: clearance,
                        price_label_text: label.map(str::to_owned),
                        rrp_text: rrp.map(str::to_owned),
                        special_price_fragment: Some(PriceFragment::from_split("49", Some("00"))),
                        main_price_fragment: main.clone(),
                    });
                }
            }
        }
    }
    out
}

#[test]
fn scenario_special_price() {
    let listing = classify(&ListingFragments {
        price_label_text: Some("Special price".into()),
        special_price_fragment: Some(PriceFragment::from_split("499", Some("00"))),
        ..ListingFragments::default()
    });
    assert_eq!(listing.original_price, None);
    assert_eq!(listing.discount_price, Some(dec("499.00")));
    assert_eq!(listing.percent_off, Some(PercentOff::Special));
}

#[test]
fn scenario_without_promo_code() {
    let listing = classify(&ListingFragments {
        price_label_text: Some("Without promo code $199.99".into()),
        main_price_fragment: Some(PriceFragment::from_split("149", Some("99"))),
        ..ListingFragments::default()
    });
    assert_eq!(listing.original_price, Some(dec("199.99")));
    assert_eq!(listing.discount_price, Some(dec("149.99")));
    assert_eq!(listing.percent_off, Some(PercentOff::Percent(dec("25.00"))));
}

#[test]
fn scenario_no_discount() {
    let listing = classify(&ListingFragments {
        rrp_text: Some("$50.00".into()),
        main_price_fragment: Some(PriceFragment::from_text("$50.00")),
        ..ListingFragments::default()
    });
    assert_eq!(listing.original_price, Some(dec("50.00")));
    assert_eq!(listing.discount_price, Some(dec("50.00")));
    assert_eq!(listing.percent_off, None);
}

#[test]
fn scenario_clearance_icon() {
    let listing = classify(&ListingFragments {
        clearance_icon_present: true,
        main_price_fragment: Some(PriceFragment::from_text("$29.99")),
        ..ListingFragments::default()
    });
    assert_eq!(listing.original_price, None);
    assert_eq!(listing.discount_price, Some(dec("29.99")));
    assert_eq!(listing.percent_off, Some(PercentOff::Special));
}

#[test]
fn fragment_truncation() {
    assert_eq!(parse_split_fragment("129", Some("5")), Some(dec("129.50")));
    assert_eq!(parse_split_fragment("129", Some("999")), Some(dec("129.99")));
}

#[test]
fn promo_precedence() {
    let base = ListingFragments {
        badge_text: Some("SAVE".into()),
        promo_banner_text: Some("Use promo code ABC123".into()),
        seasonal_icon_present: true,
        ..ListingFragments::default()
    };
    assert_eq!(classify(&base).promo_code(), Some("SAVE"));

    let no_badge = ListingFragments {
        badge_text: None,
        ..base.clone()
    };
    assert_eq!(classify(&no_badge).promo_code(), Some("ABC123"));

    let icon_only = ListingFragments {
        promo_banner_text: None,
        ..no_badge.clone()
    };
    assert_eq!(classify(&icon_only).promo_code(), Some("BF SALE"));

    let nothing = ListingFragments {
        seasonal_icon_present: false,
        ..icon_only
    };
    assert_eq!(classify(&nothing).promo_code(), None);
}

#[test]
fn special_flags_always_yield_sentinel() {
    for fragments in fragment_matrix() {
        let listing = classify(&fragments);
        if listing.flags.is_special_price || listing.flags.is_non_promo_clearance {
            assert_eq!(
                listing.percent_off,
                Some(PercentOff::Special),
                "fragments: {fragments:?}"
            );
        }
    }
}

#[test]
fn numeric_percentage_matches_prices() {
    for fragments in fragment_matrix() {
        let listing = classify(&fragments);
        let Some(PercentOff::Percent(pct)) = listing.percent_off else {
            continue;
        };
        let original = listing.original_price.expect("percentage needs original");
        let discount = listing.discount_price.expect("percentage needs discount");
        assert!(original > discount, "fragments: {fragments:?}");
        assert!(!listing.flags.is_single_price_clearance);
        let expected = ((Decimal::ONE - discount / original) * Decimal::ONE_HUNDRED).round_dp(2);
        assert_eq!(pct, expected, "fragments: {fragments:?}");
        assert!(pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED);
    }
}

#[test]
fn no_percentage_without_a_saving() {
    for fragments in fragment_matrix() {
        let listing = classify(&fragments);
        if listing.percent_off == Some(PercentOff::Special) {
            continue;
        }
        let saving = matches!(
            (listing.original_price, listing.discount_price),
            (Some(o), Some(d)) if o > d
        );
        if !saving {
            assert_eq!(listing.percent_off, None, "fragments: {fragments:?}");
        }
    }
}

#[test]
fn parallel_classification_matches_sequential() {
    let matrix = fragment_matrix();
    let sequential: Vec<_> = matrix.iter().map(classify).collect();
    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = matrix
            .chunks(16)
            .map(|chunk| scope.spawn(move || chunk.iter().map(classify).collect::<Vec<_>>()))
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("classifier thread panicked"))
            .collect()
    });
    assert_eq!(sequential, parallel);
}

#[test]
fn json_batch_round_trip_to_deal_sheet_columns() {
    let json = r#"[
        {
            "name": "Keychron K2",
            "part_number": "KBD-K2",
            "link": "https://shop.example/kbd-k2",
            "fragments": {
                "price_label_text": "Without promo code $199.99",
                "main_price_fragment": {"integer": "149", "fraction": "99"}
            }
        },
        {
            "name": "",
            "fragments": {"price_label_text": "Special price",
                          "special_price_fragment": {"integer": "499"}}
        }
    ]"#;
    let listings: Vec<ScrapedListing> = decode_listings(json).unwrap();
    let classified = classify_all(listings);
    let value = serde_json::to_value(&classified).unwrap();

    assert_eq!(value[0]["Product name"], "Keychron K2");
    assert_eq!(value[0]["Part Number"], "KBD-K2");
    assert!(value[0]["Original Price"].is_number());
    assert_eq!(value[0]["Original Price"], 199.99);
    assert_eq!(value[0]["Discount Price"], 149.99);
    assert!(value[0]["% Discount"].is_number());
    assert_eq!(value[0]["% Discount"], 25.0);
    assert!(value[0]["PromoCode"].is_null());
    assert_eq!(value[0]["Link"], "https://shop.example/kbd-k2");

    assert!(value[1]["Product name"].is_null());
    assert_eq!(value[1]["Discount Price"], 499.0);
    assert_eq!(value[1]["% Discount"], "SPECIAL");
}
