//! Error types for itinerary generation

use thiserror::Error;

/// Caller-facing failures of the itinerary pipeline
#[derive(Error, Debug)]
pub enum ItineraryError {
    /// The request could not be turned into a provider query
    #[error("Invalid input: {message}")]
    Input { message: String },

    /// Valid input, but nothing could be planned
    #[error("Generation failed: {message}")]
    Generation { message: String },
}

impl ItineraryError {
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Message safe to hand back over HTTP
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ItineraryError::Input { message } => format!("Invalid input: {message}"),
            ItineraryError::Generation { .. } => {
                "Failed to generate a suitable itinerary. Please try again later.".to_string()
            }
        }
    }
}

/// Failures of an external provider. These never leave the pipeline; they are
/// logged and turned into a fallback.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Provider call timed out after {0} ms")]
    Timeout(u128),
}
