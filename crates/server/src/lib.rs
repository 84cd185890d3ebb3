//! HTTP front end for the recommendation scoring engine.
//!
//! Routes:
//! - `GET /health`
//! - `POST /api/recommendations`
//!
//! The service is stateless: every request carries the profile and the
//! catalog snapshot it should be scored against.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use routes::create_router;
pub use service::RecommendationService;
pub use state::AppState;
