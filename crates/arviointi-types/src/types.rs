//! Core types for trade-in valuation

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fuel type derived from the two engine checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Diesel,
    #[serde(rename = "EV/Hybrid")]
    EvHybrid,
    Petrol,
}

impl FuelType {
    /// Diesel takes priority when both flags are set
    pub fn from_flags(is_diesel: bool, is_ev: bool) -> Self {
        if is_diesel {
            FuelType::Diesel
        } else if is_ev {
            FuelType::EvHybrid
        } else {
            FuelType::Petrol
        }
    }

    /// Label injected into the prompt
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::EvHybrid => "EV/Hybrid",
            FuelType::Petrol => "Petrol",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// UI and report language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[value(alias = "fi")]
    Suomi,
    #[value(alias = "en")]
    English,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Suomi => write!(f, "Suomi"),
            Language::English => write!(f, "English"),
        }
    }
}

/// Analysis mode. Each mode maps to one fixed model identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Fast visual scan
    #[default]
    Quick,
    /// Slower expert analysis
    Deep,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 2] = [AnalysisMode::Quick, AnalysisMode::Deep];

    /// Model identifier passed verbatim to the generative API
    pub fn model_id(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "gemini-2.0-flash-exp",
            AnalysisMode::Deep => "gemini-3-pro-preview",
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMode::Quick => write!(f, "quick"),
            AnalysisMode::Deep => write!(f, "deep"),
        }
    }
}

/// Which credential source is consulted first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialOrder {
    /// Environment variable, then secret store
    #[default]
    EnvFirst,
    /// Secret store, then environment variable
    SecretsFirst,
}

impl std::fmt::Display for CredentialOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialOrder::EnvFirst => write!(f, "env-first"),
            CredentialOrder::SecretsFirst => write!(f, "secrets-first"),
        }
    }
}

/// A photo ready to be sent to the model
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Encoded image bytes (JPEG, PNG or WebP)
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// One valuation submission. Lives only for a single interaction.
#[derive(Debug, Clone)]
pub struct ValuationRequest {
    pub image: CapturedImage,
    pub mileage_km: u64,
    pub is_diesel: bool,
    pub is_ev: bool,
    pub language: Language,
}

impl ValuationRequest {
    pub fn fuel_type(&self) -> FuelType {
        FuelType::from_flags(self.is_diesel, self.is_ev)
    }
}

/// Model reply plus whatever could be pulled out of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResponse {
    /// Unprocessed model output
    pub raw_text: String,
    /// Low end of the range, literal matched text
    #[serde(default)]
    pub low_bid: Option<String>,
    /// High end of the range, literal matched text
    #[serde(default)]
    pub high_bid: Option<String>,
    /// High bid x 1.3, truncated. None when no range or unparseable.
    #[serde(default)]
    pub retail_estimate: Option<u64>,
}

impl ValuationResponse {
    /// Whether the summary tiles should be shown
    pub fn has_price_range(&self) -> bool {
        self.low_bid.is_some() && self.high_bid.is_some()
    }
}

/// Machine-readable envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub language: Language,
    pub mode: AnalysisMode,
    pub model: String,
    pub mileage_km: u64,
    pub fuel: FuelType,
    pub generated_at: DateTime<Utc>,
    pub response: ValuationResponse,
}
