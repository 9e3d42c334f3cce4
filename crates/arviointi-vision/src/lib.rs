//! Vision module - AI-powered trade-in valuation from a single photo
//!
//! This crate provides:
//! - Photo loading and validation
//! - The buyer-persona prompt
//! - A Gemini client behind the `ValuationClient` trait
//! - Price range extraction and the derived retail estimate

pub mod ai;
pub mod capture;
pub mod extract;

// Re-export main types for convenience
pub use ai::client::{GeminiClient, ValuationClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use ai::prompts::{build_request_prompt, build_valuation_prompt, language_instruction, SYSTEM_INSTRUCTION};
pub use capture::{capture_from_bytes, is_supported_image, load_image};
pub use extract::{estimate_retail, extract_price_range, parse_valuation, PriceRange};

use arviointi_types::{AnalysisMode, Error, Result, ValuationRequest, ValuationResponse};
use tracing::info;

/// Run one valuation: build the prompt, call the model, parse the reply.
///
/// An empty key fails with `MissingCredential` before the client is touched.
pub fn valuate(
    request: &ValuationRequest,
    mode: AnalysisMode,
    api_key: &str,
    client: &dyn ValuationClient,
) -> Result<ValuationResponse> {
    if api_key.trim().is_empty() {
        return Err(Error::MissingCredential);
    }

    let prompt = build_request_prompt(request);
    let model = mode.model_id();

    info!(
        %mode,
        model,
        mileage_km = request.mileage_km,
        fuel = %request.fuel_type(),
        "Requesting valuation"
    );

    let raw_text = client.generate(&prompt, &request.image, model, api_key)?;
    let response = parse_valuation(raw_text);

    info!(
        price_range = response.has_price_range(),
        retail = ?response.retail_estimate,
        "Valuation received"
    );

    Ok(response)
}
