//! Error types and handling for `TripWeaver`
//!
//! The ingestion core (sanitizer and normalizer) never surfaces errors to its
//! callers; these types cover everything around it: configuration, the model
//! endpoint, and trip request validation.

use thiserror::Error;

/// Main error type for the `TripWeaver` application
#[derive(Error, Debug)]
pub enum TripError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Language-model endpoint errors
    #[error("Model API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl TripError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new model API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripError::Config { .. } => {
                "Configuration error. Please check your config file and model API key.".to_string()
            }
            TripError::Api { .. } => {
                "Failed to generate trip. Please try again!".to_string()
            }
            TripError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
