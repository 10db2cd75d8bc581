//! AI predictor seam.
//!
//! The predictor is advisory only: any failure degrades to `None` and the
//! categorization pipeline carries on with keyword matching. Implementations
//! are built once and injected, not reached through global state.

pub mod ollama;

use async_trait::async_trait;

use crate::model::Priority;

pub use ollama::OllamaPredictor;

/// A predictor's guess for one complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted category name, if the model offered one. Resolved against
    /// the category store case-insensitively; unknown names are ignored.
    pub category: Option<String>,
    pub priority: Priority,
}

/// Text-classification collaborator consulted during categorization.
#[async_trait]
pub trait AiPredictor: Send + Sync {
    /// Best-effort prediction; `None` on timeout, transport failure, or
    /// unparseable output. Must not take longer than its configured timeout.
    async fn predict(&self, title: &str, description: &str) -> Option<Prediction>;
}

/// Predictor that never predicts. Used when prediction is disabled.
pub struct NullPredictor;

#[async_trait]
impl AiPredictor for NullPredictor {
    async fn predict(&self, _title: &str, _description: &str) -> Option<Prediction> {
        None
    }
}
