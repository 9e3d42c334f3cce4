//! Use cases

pub mod valuation_service;

pub use valuation_service::{ValuationOptions, ValuationService, ValuationServiceError};
