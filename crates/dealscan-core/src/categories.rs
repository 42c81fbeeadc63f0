//! Keyword-based product category tagging for the deal report.
//!
//! Independent of classification: a product name is matched against a fixed
//! keyword table and tagged with every category whose keyword appears in it.

use std::collections::BTreeSet;

/// Category assigned when a name matches no keyword.
pub const OTHER_CATEGORY: &str = "other";

/// Categories in priority order with their keywords. A keyword listed under
/// several categories belongs to the one appearing last.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "case",
        &[
            "case",
            "cover",
            "shell",
            "protector",
            "skin",
            "sleeve",
            "screen guard",
            "spigen",
            "otterbox",
            "uag",
        ],
    ),
    (
        "cable",
        &["cable", "usb", "hdmi", "lightning", "usb-c", "ethernet", "adapter"],
    ),
    (
        "power",
        &["power", "charger", "adapter", "psu", "powerbank", "battery", "ups"],
    ),
    (
        "accessory",
        &["accessory", "stand", "mount", "dock", "hub", "stylus", "bag"],
    ),
    (
        "storage",
        &[
            "ssd",
            "hdd",
            "nvme",
            "usb drive",
            "sd card",
            "nas",
            "samsung evo",
            "wd",
            "seagate",
        ],
    ),
    ("mouse", &["mouse", "mice", "trackball", "logitech", "razer"]),
    ("keyboard", &["keyboard", "keypad", "mechanical kb", "keychron"]),
    (
        "headphone",
        &["headphone", "earbuds", "headset", "airpods", "jabra", "sony", "bose"],
    ),
    ("speaker", &["speaker", "soundbar", "sonos", "jbl", "ue"]),
    ("monitor", &["monitor", "display", "screen", "ultrawide"]),
    (
        "component",
        &[
            "cpu",
            "gpu",
            "motherboard",
            "ram",
            "graphics card",
            "ryzen",
            "geforce",
            "intel",
            "amd",
            "rtx",
            "gtx",
        ],
    ),
    (
        "appliance",
        &["vacuum", "fryer", "dyson", "xiaomi", "kettle", "toaster"],
    ),
    (
        "laptop",
        &["laptop", "notebook", "macbook", "thinkpad", "surface", "zenbook"],
    ),
    ("tablet", &["tablet", "ipad", "galaxy tab", "kindle"]),
    ("phone", &["phone", "mobile", "iphone", "samsung", "pixel", "oppo"]),
];

/// Returns the category that owns `keyword`: the last category in priority
/// order that lists it.
fn owning_category(keyword: &str) -> Option<&'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .rev()
        .find(|(_, keywords)| keywords.contains(&keyword))
        .map(|(category, _)| *category)
}

/// Tags a product name with categories by case-insensitive keyword match.
///
/// Returns categories sorted alphabetically. An empty or absent name yields
/// no categories; a name matching no keyword yields `["other"]`.
#[must_use]
pub fn detect_categories(name: Option<&str>) -> Vec<&'static str> {
    let lower = name.unwrap_or_default().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }

    let mut found = BTreeSet::new();
    for (_, keywords) in CATEGORY_KEYWORDS {
        for keyword in *keywords {
            if lower.contains(keyword) {
                if let Some(category) = owning_category(keyword) {
                    found.insert(category);
                }
            }
        }
    }

    if found.is_empty() {
        found.insert(OTHER_CATEGORY);
    }
    found.into_iter().collect()
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
