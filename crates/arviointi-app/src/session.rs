//! Valuation session state machine
//!
//! Idle -> ImageCaptured -> InputsPending -> Submitting -> ResultsDisplayed,
//! with any submission failure landing in Error. Capturing a new image starts
//! over from any state.

use crate::locale::translations;
use arviointi_types::{
    AnalysisMode, CapturedImage, Error, Language, Result, ValuationRequest, ValuationResponse,
};
use arviointi_vision::{valuate, ValuationClient};
use tracing::debug;

/// Progress callback, called with the busy text when submission starts
pub type ProgressCallback = Box<dyn Fn(&str) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ImageCaptured,
    InputsPending,
    Submitting,
    ResultsDisplayed,
    Error,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::ImageCaptured => "image captured",
            SessionState::InputsPending => "inputs pending",
            SessionState::Submitting => "submitting",
            SessionState::ResultsDisplayed => "results displayed",
            SessionState::Error => "error",
        };
        f.write_str(name)
    }
}

/// Agent-entered vehicle details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleDetails {
    pub mileage_km: u64,
    pub is_diesel: bool,
    pub is_ev: bool,
}

/// One interaction with the valuation tool
#[derive(Debug)]
pub struct Session {
    language: Language,
    state: SessionState,
    image: Option<CapturedImage>,
    details: Option<VehicleDetails>,
    response: Option<ValuationResponse>,
    error_message: Option<String>,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            state: SessionState::Idle,
            image: None,
            details: None,
            response: None,
            error_message: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn response(&self) -> Option<&ValuationResponse> {
        self.response.as_ref()
    }

    /// Localized message of the last failure
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn details(&self) -> Option<VehicleDetails> {
        self.details
    }

    /// Back to Idle, dropping everything from the last interaction
    pub fn reset(&mut self) {
        *self = Self::new(self.language);
    }

    /// Accept a new photo. Allowed from every state.
    pub fn capture_image(&mut self, image: CapturedImage) {
        self.reset();
        self.image = Some(image);
        self.transition(SessionState::ImageCaptured);
    }

    /// Record mileage and fuel flags for the captured photo
    pub fn enter_details(&mut self, details: VehicleDetails) -> Result<()> {
        match self.state {
            SessionState::ImageCaptured | SessionState::InputsPending => {
                self.details = Some(details);
                self.transition(SessionState::InputsPending);
                Ok(())
            }
            other => Err(Error::InvalidTransition(format!(
                "cannot enter vehicle details while {}",
                other
            ))),
        }
    }

    /// Submit the request. Without a key the client is never called.
    pub fn submit(
        &mut self,
        api_key: Option<&str>,
        mode: AnalysisMode,
        client: &dyn ValuationClient,
        progress: Option<ProgressCallback>,
    ) -> Result<ValuationResponse> {
        if self.state != SessionState::InputsPending {
            return Err(Error::InvalidTransition(format!(
                "cannot submit while {}",
                self.state
            )));
        }

        let (Some(image), Some(details)) = (self.image.clone(), self.details) else {
            return Err(Error::InvalidTransition(
                "submission requires an image and vehicle details".to_string(),
            ));
        };

        let api_key = match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => return Err(self.fail(Error::MissingCredential)),
        };

        self.transition(SessionState::Submitting);
        if let Some(ref cb) = progress {
            cb(translations(self.language).spinner(mode));
        }

        let request = ValuationRequest {
            image,
            mileage_km: details.mileage_km,
            is_diesel: details.is_diesel,
            is_ev: details.is_ev,
            language: self.language,
        };

        match valuate(&request, mode, api_key, client) {
            Ok(response) => {
                self.response = Some(response.clone());
                self.transition(SessionState::ResultsDisplayed);
                Ok(response)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: Error) -> Error {
        self.error_message = Some(translations(self.language).describe_error(&err));
        self.transition(SessionState::Error);
        err
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "Session transition");
        self.state = next;
    }
}
