//! JSON-file-backed store for the daemon.
//!
//! The whole state is kept in memory behind a lock and rewritten as pretty
//! JSON after every mutation. Suited to the daemon's scale (one writer, a
//! sweep an hour); anything bigger belongs behind the same traits with a
//! real database.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AuditSink, CategoryStore, ComplaintStore, EscalationHistorySink, StoreError, StoreResult,
};
use crate::model::{AuditLogEntry, Category, Complaint, EscalationHistoryEntry};

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileState {
    complaints: Vec<Complaint>,
    categories: Vec<Category>,
    audit_log: Vec<AuditLogEntry>,
    escalation_history: Vec<EscalationHistoryEntry>,
}

/// File-backed implementation of the store traits.
pub struct FileStore {
    path: PathBuf,
    state: RwLock<FileState>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty state if the file does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let state = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            FileState::default()
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed categories when none exist yet. Returns whether seeding happened.
    pub fn seed_categories(&self, categories: Vec<Category>) -> StoreResult<bool> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        if !state.categories.is_empty() {
            return Ok(false);
        }
        state.categories = categories;
        state.categories.sort_by_key(|c| c.id);
        self.persist(&state)?;
        Ok(true)
    }

    fn persist(&self, state: &FileState) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ComplaintStore for FileStore {
    fn find(&self, id: Uuid) -> StoreResult<Option<Complaint>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.complaints.iter().find(|c| c.id == id).cloned())
    }

    fn find_overdue_open(&self, cutoff: DateTime<Utc>) -> StoreResult<Vec<Complaint>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .complaints
            .iter()
            .filter(|c| c.status.is_open() && !c.is_escalated && c.created_at <= cutoff)
            .cloned()
            .collect())
    }

    fn save(&self, complaint: &Complaint) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        match state.complaints.iter_mut().find(|c| c.id == complaint.id) {
            Some(existing) => *existing = complaint.clone(),
            None => state.complaints.push(complaint.clone()),
        }
        self.persist(&state)
    }
}

impl CategoryStore for FileStore {
    fn all(&self) -> StoreResult<Vec<Category>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.categories.clone())
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}

impl AuditSink for FileStore {
    fn append(&self, entry: AuditLogEntry) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        state.audit_log.push(entry);
        self.persist(&state)
    }
}

impl EscalationHistorySink for FileStore {
    fn append(&self, entry: EscalationHistoryEntry) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        state.escalation_history.push(entry);
        self.persist(&state)
    }
}
