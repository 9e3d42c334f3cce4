//! Price range extraction and retail estimate
//!
//! The range is taken from the first `€LOW - €HIGH` occurrence in the reply.
//! Tokens are kept exactly as matched; only the retail figure is computed.

use arviointi_types::ValuationResponse;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Markup applied to the aggressive bid to approximate resale price
pub const RETAIL_MARKUP: f64 = 1.3;

static PRICE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"€\s?([0-9,.]+)\s?-\s?€\s?([0-9,.]+)").expect("price range pattern is valid")
});

/// Conservative and aggressive bid as literal matched text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRange {
    pub low: String,
    pub high: String,
}

/// Find the first euro price range in free text
pub fn extract_price_range(text: &str) -> Option<PriceRange> {
    let caps = PRICE_RANGE.captures(text)?;
    Some(PriceRange {
        low: caps[1].to_string(),
        high: caps[2].to_string(),
    })
}

/// High bid x 1.3, truncated.
///
/// Both `,` and `.` are removed before parsing, so "1,234.56" becomes
/// 123456. Returns `None` when the remainder is not a finite number.
pub fn estimate_retail(high_bid: &str) -> Option<u64> {
    let cleaned: String = high_bid.chars().filter(|c| *c != ',' && *c != '.').collect();
    let value: f64 = cleaned.parse().ok()?;
    let retail = (value * RETAIL_MARKUP).trunc();

    if !retail.is_finite() || retail < 0.0 || retail >= u64::MAX as f64 {
        return None;
    }
    Some(retail as u64)
}

/// Build the full response from the model's raw text
pub fn parse_valuation(raw_text: String) -> ValuationResponse {
    match extract_price_range(&raw_text) {
        Some(range) => {
            let retail_estimate = estimate_retail(&range.high);
            if retail_estimate.is_none() {
                debug!(high = %range.high, "High bid is not numeric, retail estimate unavailable");
            }
            ValuationResponse {
                low_bid: Some(range.low),
                high_bid: Some(range.high),
                retail_estimate,
                raw_text,
            }
        }
        None => {
            debug!("No euro price range found in model response");
            ValuationResponse {
                raw_text,
                ..Default::default()
            }
        }
    }
}
