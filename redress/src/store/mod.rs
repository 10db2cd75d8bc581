//! Storage seams for the categorization and escalation core.
//!
//! Persistence is a collaborator, not a concern of the core: the orchestrator
//! and sweeper only see these narrow traits. `memory::MemoryStore` backs
//! tests and embedded use; `file::FileStore` backs the daemon.

pub mod file;
pub mod memory;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{AuditLogEntry, Category, Complaint, EscalationHistoryEntry};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Access to the long-lived complaint entities.
pub trait ComplaintStore: Send + Sync {
    fn find(&self, id: Uuid) -> StoreResult<Option<Complaint>>;

    /// Complaints eligible for escalation: still open (not resolved/closed),
    /// not yet escalated, and created at or before `cutoff`.
    fn find_overdue_open(&self, cutoff: DateTime<Utc>) -> StoreResult<Vec<Complaint>>;

    /// Insert or replace by id.
    fn save(&self, complaint: &Complaint) -> StoreResult<()>;
}

/// Read-only access to the category reference data.
pub trait CategoryStore: Send + Sync {
    /// All categories in ascending-id order.
    fn all(&self) -> StoreResult<Vec<Category>>;

    /// Case-insensitive exact-name lookup.
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>>;
}

/// Append-only audit trail sink.
pub trait AuditSink: Send + Sync {
    fn append(&self, entry: AuditLogEntry) -> StoreResult<()>;
}

/// Append-only escalation history sink, independent of the audit log.
pub trait EscalationHistorySink: Send + Sync {
    fn append(&self, entry: EscalationHistoryEntry) -> StoreResult<()>;
}
