//! Complaint categorization and SLA escalation core.
//!
//! This library provides:
//! - Keyword-based categorization of free-text complaints, with an optional
//!   AI predictor consulted first and a severity-first priority fallback
//! - A periodic SLA escalation sweep that bumps overdue complaints one
//!   priority tier and records audit + escalation-history trails
//!
//! Persistence, HTTP routing, authentication, and file storage stay behind
//! the narrow traits in [`store`]; in-memory and JSON-file implementations
//! are included. The `redressd` binary wires everything into a daemon.

pub mod classify;
pub mod config;
pub mod escalation;
pub mod model;
pub mod predictor;
pub mod scheduler;
pub mod seed;
pub mod store;

// Re-export key domain types
pub use model::{
    AuditLogEntry, Category, Complaint, ComplaintStatus, EscalationHistoryEntry, Priority,
};

// Re-export categorization types
pub use classify::{
    fallback_priority, match_category, normalize, CategorizeOutcome, Categorizer, CategoryMatch,
};

// Re-export predictor types
pub use predictor::{AiPredictor, NullPredictor, OllamaPredictor, Prediction};

// Re-export escalation types
pub use escalation::{EscalationSweeper, SweepReport};

// Re-export store seams and implementations
pub use store::{
    AuditSink, CategoryStore, ComplaintStore, EscalationHistorySink, StoreError, StoreResult,
};
pub use store::{file::FileStore, memory::MemoryStore};

// Re-export configuration
pub use config::{PredictorConfig, RedressConfig};
