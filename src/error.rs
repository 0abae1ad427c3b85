// src/error.rs

//! Unified error handling for the rank checker.

use std::fmt;

use thiserror::Error;

/// Result type alias for rank checker operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error - aborts the run before any fetch
    #[error("Configuration error: {0}")]
    Config(String),

    /// A result page contained no recognizable listing block.
    ///
    /// Soft miss: the cursor stays active and the next page is tried.
    #[error("no listings found")]
    NoListings,

    /// Transport or backend failure for one page fetch
    #[error("Fetch error for {engine}: {message}")]
    Fetch { engine: String, message: String },

    /// A backend could not be brought up for a campaign
    #[error("Failed to register engine {engine}: {message}")]
    Registration { engine: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a fetch error for one engine.
    pub fn fetch(engine: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            engine: engine.into(),
            message: message.to_string(),
        }
    }

    /// Create an engine registration error.
    pub fn registration(engine: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Registration {
            engine: engine.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error leaves the cursor active (retry on the next page).
    pub fn is_soft_miss(&self) -> bool {
        matches!(self, Self::NoListings)
    }
}
