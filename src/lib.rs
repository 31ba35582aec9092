//! `TripWeaver` - Travel-planning model response cleanup and normalization
//!
//! This library turns raw generative-model output into the canonical hotel,
//! itinerary, budget, packing, shopping and flight records a trip planner
//! consumes, and drives the model to produce them.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod models;
pub mod normalize;
pub mod planner;
pub mod prompts;
pub mod sanitizer;
pub mod web;

// Re-export core types for public API
pub use config::TripWeaverConfig;
pub use context::TripContext;
pub use error::TripError;
pub use llm::{GeminiClient, ModelClient};
pub use normalize::{Normalized, RecordKind, normalize, normalize_response};
pub use planner::TripPlanner;
pub use prompts::TripRequest;
pub use sanitizer::{SanitizeError, extract_value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripError>;
