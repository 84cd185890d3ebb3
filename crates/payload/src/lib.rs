//! # Payload Crate
//!
//! JSON boundary for the scoring engine.
//!
//! ## Main Components
//!
//! - **request**: `parse_request` / `load_request` into a `ScoringRequest`
//! - **response**: the `RecommendationResponse` envelope
//! - **error**: `PayloadError`
//!
//! Field-name variants, numeric strings and genre-label casing are all
//! reconciled here; nothing past this crate ever sees them.
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::ScoringEngine;
//! use payload::parse_request;
//!
//! let request = parse_request(&body)?;
//! let response = request.evaluate(&ScoringEngine::new())?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! ```

pub mod error;
mod raw;
pub mod request;
pub mod response;

pub use error::{PayloadError, Result};
pub use request::{ScoringRequest, load_request, parse_request};
pub use response::RecommendationResponse;
