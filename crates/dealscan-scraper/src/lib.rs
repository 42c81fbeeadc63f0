pub mod batch;
pub mod classify;
pub mod error;
pub mod parse;
pub mod report;

pub use batch::{classify_all, classify_listing, decode_listings, BatchSummary};
pub use classify::{classify, PriceLabel};
pub use error::ScraperError;
pub use parse::{parse_currency_text, parse_price_fragment, parse_split_fragment};
pub use report::{build_report, ReportPayload, ReportRow};
