//! Complaint categorization: keyword matching, priority fallback, and the
//! orchestrator that ties them to the AI predictor.

pub mod fallback;
pub mod matcher;
pub mod orchestrator;

pub use fallback::fallback_priority;
pub use matcher::{match_category, normalize, CategoryMatch};
pub use orchestrator::{CategorizeOutcome, Categorizer};
