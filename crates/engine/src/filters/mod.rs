//! Filter implementations for the eligibility stage.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod already_interacted;
pub mod well_formed;

// Re-export for convenience
pub use already_interacted::AlreadyInteractedFilter;
pub use well_formed::WellFormedFilter;
