//! Application service layer - config, credentials, locale, valuation session

pub mod app;
pub mod config;
pub mod credentials;
pub mod locale;
pub mod session;
