//! In-memory store implementing all four storage seams.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    AuditSink, CategoryStore, ComplaintStore, EscalationHistorySink, StoreError, StoreResult,
};
use crate::model::{AuditLogEntry, Category, Complaint, EscalationHistoryEntry};

#[derive(Default)]
struct Inner {
    complaints: HashMap<Uuid, Complaint>,
    categories: Vec<Category>,
    audit_log: Vec<AuditLogEntry>,
    escalation_history: Vec<EscalationHistoryEntry>,
}

/// In-memory implementation of the store traits.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given categories, kept in
    /// ascending-id order for deterministic iteration.
    pub fn with_categories(mut categories: Vec<Category>) -> Self {
        categories.sort_by_key(|c| c.id);
        Self {
            inner: RwLock::new(Inner {
                categories,
                ..Inner::default()
            }),
        }
    }

    /// Snapshot of the audit log, oldest first.
    pub fn audit_entries(&self) -> StoreResult<Vec<AuditLogEntry>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.audit_log.clone())
    }

    /// Snapshot of the escalation history, oldest first.
    pub fn history_entries(&self) -> StoreResult<Vec<EscalationHistoryEntry>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.escalation_history.clone())
    }
}

impl ComplaintStore for MemoryStore {
    fn find(&self, id: Uuid) -> StoreResult<Option<Complaint>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.complaints.get(&id).cloned())
    }

    fn find_overdue_open(&self, cutoff: DateTime<Utc>) -> StoreResult<Vec<Complaint>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut overdue: Vec<Complaint> = inner
            .complaints
            .values()
            .filter(|c| c.status.is_open() && !c.is_escalated && c.created_at <= cutoff)
            .cloned()
            .collect();
        overdue.sort_by_key(|c| c.created_at);
        Ok(overdue)
    }

    fn save(&self, complaint: &Complaint) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.complaints.insert(complaint.id, complaint.clone());
        Ok(())
    }
}

impl CategoryStore for MemoryStore {
    fn all(&self) -> StoreResult<Vec<Category>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.categories.clone())
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}

impl AuditSink for MemoryStore {
    fn append(&self, entry: AuditLogEntry) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.audit_log.push(entry);
        Ok(())
    }
}

impl EscalationHistorySink for MemoryStore {
    fn append(&self, entry: EscalationHistoryEntry) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.escalation_history.push(entry);
        Ok(())
    }
}
