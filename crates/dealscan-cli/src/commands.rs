//! Command handlers for the CLI.
//!
//! Both commands read the extractor's JSON array from disk, classify every
//! listing, and write pretty-printed JSON. Failures at the file boundary are
//! fatal; listings themselves never fail to classify.

use std::path::Path;

use anyhow::Context;
use dealscan_core::{AppConfig, ClassifiedListing};
use serde::Serialize;

/// Classify listings from `input` and write the deal-sheet rows to `output`.
pub(crate) async fn run_classify(input: &Path, output: &Path) -> anyhow::Result<()> {
    let classified = load_and_classify(input).await?;
    write_json(output, &classified).await?;
    tracing::info!(
        listings = classified.len(),
        output = %output.display(),
        "wrote classified listings"
    );
    Ok(())
}

/// Classify listings from `input` and write the report payload to `output`.
pub(crate) async fn run_report(
    config: &AppConfig,
    input: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let classified = load_and_classify(input).await?;
    let payload = dealscan_scraper::build_report(&classified, config.gst_rate);
    write_json(output, &payload).await?;
    tracing::info!(
        rows = payload.rows.len(),
        promo_codes = payload.promo_codes.len(),
        output = %output.display(),
        "wrote deal report"
    );
    Ok(())
}

async fn load_and_classify(input: &Path) -> anyhow::Result<Vec<ClassifiedListing>> {
    let raw = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read listings from {}", input.display()))?;
    let listings = dealscan_scraper::decode_listings(&raw)
        .with_context(|| format!("failed to decode listings in {}", input.display()))?;
    if listings.is_empty() {
        tracing::warn!(input = %input.display(), "input contains no listings");
    }
    Ok(dealscan_scraper::classify_all(listings))
}

async fn write_json<T: Serialize>(output: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    tokio::fs::write(output, body)
        .await
        .with_context(|| format!("failed to write {}", output.display()))
}
