//! Valuation Service - Core Use Case for Photo Valuation
//!
//! This service orchestrates one complete interaction:
//! 1. Load and validate the photo
//! 2. Record mileage and fuel flags
//! 3. Block submission if no API key was resolved
//! 4. Call the model through the session
//! 5. Wrap the parsed response in a report

use crate::config::Config;
use crate::credentials::ResolvedCredential;
use crate::locale::{translations, Translations};
use crate::session::{ProgressCallback, Session, VehicleDetails};
use arviointi_types::{
    AnalysisMode, CapturedImage, Error, FuelType, Language, Result, ValuationReport,
};
use arviointi_vision::{load_image, GeminiClient, ValuationClient};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors specific to the valuation service. Messages are user-facing.
#[derive(Debug, Error)]
pub enum ValuationServiceError {
    #[error("{0}")]
    MissingCredential(String),

    #[error("{0}")]
    ExternalService(String),

    #[error("Image validation failed: {0}")]
    InvalidImage(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl ValuationServiceError {
    /// Map a core error to its user-facing form in the given language
    pub fn localized(err: Error, t: &Translations) -> Self {
        match err {
            Error::MissingCredential => {
                ValuationServiceError::MissingCredential(t.describe_error(&err))
            }
            Error::ExternalService(_) => {
                ValuationServiceError::ExternalService(t.describe_error(&err))
            }
            Error::FileNotFound(_) | Error::InvalidImageFormat(_) | Error::Image(_) | Error::Io(_) => {
                ValuationServiceError::InvalidImage(err.to_string())
            }
            other => ValuationServiceError::Session(other.to_string()),
        }
    }
}

/// Options for one valuation
#[derive(Debug, Clone, Copy)]
pub struct ValuationOptions {
    pub details: VehicleDetails,
    pub mode: AnalysisMode,
    pub language: Language,
}

/// Runs valuations against a model client
pub struct ValuationService {
    client: Box<dyn ValuationClient>,
}

impl ValuationService {
    /// Service backed by the Gemini API as configured
    pub fn new(config: &Config) -> Result<Self> {
        let client = GeminiClient::new(Duration::from_secs(config.request_timeout_secs))?
            .with_endpoint(config.endpoint());
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(client: Box<dyn ValuationClient>) -> Self {
        Self { client }
    }

    /// Load the photo at `path` and value it
    pub fn run_path(
        &self,
        path: &Path,
        options: &ValuationOptions,
        credential: Option<&ResolvedCredential>,
        progress: Option<ProgressCallback>,
    ) -> std::result::Result<ValuationReport, ValuationServiceError> {
        let image = load_image(path)
            .map_err(|e| ValuationServiceError::localized(e, translations(options.language)))?;
        self.run(image, options, credential, progress)
    }

    /// Value an already captured photo
    pub fn run(
        &self,
        image: CapturedImage,
        options: &ValuationOptions,
        credential: Option<&ResolvedCredential>,
        progress: Option<ProgressCallback>,
    ) -> std::result::Result<ValuationReport, ValuationServiceError> {
        let t = translations(options.language);
        let mut session = Session::new(options.language);

        session.capture_image(image);
        session
            .enter_details(options.details)
            .map_err(|e| ValuationServiceError::localized(e, t))?;

        let api_key = credential.map(|c| c.api_key.as_str());
        let response = session
            .submit(api_key, options.mode, self.client.as_ref(), progress)
            .map_err(|e| ValuationServiceError::localized(e, t))?;

        Ok(ValuationReport {
            language: options.language,
            mode: options.mode,
            model: options.mode.model_id().to_string(),
            mileage_km: options.details.mileage_km,
            fuel: FuelType::from_flags(options.details.is_diesel, options.details.is_ev),
            generated_at: chrono::Utc::now(),
            response,
        })
    }
}
