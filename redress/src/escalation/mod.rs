//! SLA escalation sweep.
//!
//! Scans open complaints past the SLA window, bumps their priority one tier,
//! and records the event in both the audit log and the escalation history.
//! Escalation is terminal per complaint: once `is_escalated` is set the
//! sweep never touches it again, and status is left alone.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::config::RedressConfig;
use crate::model::{AuditLogEntry, EscalationHistoryEntry};
use crate::store::{AuditSink, ComplaintStore, EscalationHistorySink, StoreResult};

/// Result of one sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// How many overdue complaints the selection returned.
    pub examined: usize,
    /// How many were escalated this sweep.
    pub escalated: usize,
    pub escalated_ids: Vec<Uuid>,
    pub swept_at: DateTime<Utc>,
}

impl SweepReport {
    fn empty(swept_at: DateTime<Utc>) -> Self {
        Self {
            examined: 0,
            escalated: 0,
            escalated_ids: Vec::new(),
            swept_at,
        }
    }
}

/// Periodic escalation job over the complaint store.
pub struct EscalationSweeper {
    complaints: Arc<dyn ComplaintStore>,
    audit: Arc<dyn AuditSink>,
    history: Arc<dyn EscalationHistorySink>,
    sla_days: u32,
    enabled: bool,
}

impl EscalationSweeper {
    pub fn new(
        complaints: Arc<dyn ComplaintStore>,
        audit: Arc<dyn AuditSink>,
        history: Arc<dyn EscalationHistorySink>,
        config: &RedressConfig,
    ) -> Self {
        Self {
            complaints,
            audit,
            history,
            sla_days: config.sla_days,
            enabled: config.escalation_enabled,
        }
    }

    /// Escalate every open, not-yet-escalated complaint created at or before
    /// `now - sla_days`. Each complaint is committed individually: complaint
    /// row, history entry, audit entry, in that order, before the next one
    /// is touched.
    pub fn sweep(&self, now: DateTime<Utc>) -> StoreResult<SweepReport> {
        if !self.enabled {
            return Ok(SweepReport::empty(now));
        }

        let cutoff = now - Duration::days(i64::from(self.sla_days));
        let overdue = self.complaints.find_overdue_open(cutoff)?;
        let examined = overdue.len();
        let reason = format!("Auto-escalated: SLA ({} days) exceeded.", self.sla_days);

        let mut escalated_ids = Vec::new();
        for mut complaint in overdue {
            // Re-check in case a writer raced the selection.
            if complaint.is_escalated || !complaint.status.is_open() {
                continue;
            }

            let old_priority = complaint.priority;
            let new_priority = old_priority.escalate();
            complaint.priority = new_priority;
            complaint.is_escalated = true;
            complaint.escalated_at = Some(now);
            complaint.escalation_reason = Some(reason.clone());
            complaint.updated_at = now;
            self.complaints.save(&complaint)?;

            self.history.append(EscalationHistoryEntry::new(
                complaint.id,
                old_priority,
                new_priority,
                &reason,
                now,
            ))?;
            self.audit.append(AuditLogEntry::new(
                complaint.id,
                None,
                "escalation",
                Some(old_priority.to_string()),
                Some(new_priority.to_string()),
                Some(reason.clone()),
                now,
            ))?;

            tracing::info!(
                "escalated complaint {}: {} -> {}",
                complaint.id,
                old_priority,
                new_priority
            );
            escalated_ids.push(complaint.id);
        }

        Ok(SweepReport {
            examined,
            escalated: escalated_ids.len(),
            escalated_ids,
            swept_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Complaint, ComplaintStatus, Priority};
    use crate::store::memory::MemoryStore;

    fn config(enabled: bool) -> RedressConfig {
        RedressConfig {
            escalation_enabled: enabled,
            sla_days: 3,
            ..RedressConfig::default()
        }
    }

    fn sweeper(store: &Arc<MemoryStore>, enabled: bool) -> EscalationSweeper {
        EscalationSweeper::new(store.clone(), store.clone(), store.clone(), &config(enabled))
    }

    fn overdue_complaint(store: &MemoryStore, now: DateTime<Utc>, priority: Priority) -> Complaint {
        let mut c = Complaint::new("old", "a long-ignored problem", 3);
        c.created_at = now - Duration::days(4);
        c.priority = priority;
        store.save(&c).unwrap();
        c
    }

    #[test]
    fn test_overdue_complaint_is_escalated_once() {
        let store = Arc::new(MemoryStore::new());
        let sweeper = sweeper(&store, true);
        let now = Utc::now();
        let c = overdue_complaint(&store, now, Priority::Medium);

        let report = sweeper.sweep(now).unwrap();
        assert_eq!(report.escalated, 1);
        assert_eq!(report.escalated_ids, vec![c.id]);

        let after = store.find(c.id).unwrap().unwrap();
        assert!(after.is_escalated);
        assert_eq!(after.priority, Priority::High);
        assert_eq!(after.escalated_at, Some(now));
        assert_eq!(
            after.escalation_reason.as_deref(),
            Some("Auto-escalated: SLA (3 days) exceeded.")
        );
        // Escalation never advances status
        assert_eq!(after.status, ComplaintStatus::Submitted);

        // Monotonic: a second sweep is a no-op for this complaint
        let again = sweeper.sweep(Utc::now()).unwrap();
        assert_eq!(again.escalated, 0);
        assert_eq!(store.find(c.id).unwrap().unwrap().priority, Priority::High);
    }

    #[test]
    fn test_critical_stays_critical() {
        let store = Arc::new(MemoryStore::new());
        let sweeper = sweeper(&store, true);
        let now = Utc::now();
        let c = overdue_complaint(&store, now, Priority::Critical);

        sweeper.sweep(now).unwrap();
        let after = store.find(c.id).unwrap().unwrap();
        assert_eq!(after.priority, Priority::Critical);
        assert!(after.is_escalated);
    }

    #[test]
    fn test_resolved_and_closed_are_never_selected() {
        let store = Arc::new(MemoryStore::new());
        let sweeper = sweeper(&store, true);
        let now = Utc::now();

        for status in [ComplaintStatus::Resolved, ComplaintStatus::Closed] {
            let mut c = Complaint::new("done", "handled ages ago", 3);
            c.created_at = now - Duration::days(30);
            c.status = status;
            store.save(&c).unwrap();
        }

        let report = sweeper.sweep(now).unwrap();
        assert_eq!(report.examined, 0);
        assert_eq!(report.escalated, 0);
    }

    #[test]
    fn test_fresh_complaints_are_left_alone() {
        let store = Arc::new(MemoryStore::new());
        let sweeper = sweeper(&store, true);
        let now = Utc::now();

        let c = Complaint::new("new", "filed this morning", 3);
        store.save(&c).unwrap();

        let report = sweeper.sweep(now).unwrap();
        assert_eq!(report.escalated, 0);
        assert!(!store.find(c.id).unwrap().unwrap().is_escalated);
    }

    #[test]
    fn test_disabled_sweep_is_a_noop() {
        let store = Arc::new(MemoryStore::new());
        let sweeper = sweeper(&store, false);
        let now = Utc::now();
        let c = overdue_complaint(&store, now, Priority::Low);

        let report = sweeper.sweep(now).unwrap();
        assert_eq!(report.escalated, 0);
        assert!(!store.find(c.id).unwrap().unwrap().is_escalated);
    }

    #[test]
    fn test_each_escalation_writes_both_trails() {
        let store = Arc::new(MemoryStore::new());
        let sweeper = sweeper(&store, true);
        let now = Utc::now();
        overdue_complaint(&store, now, Priority::Low);
        overdue_complaint(&store, now, Priority::High);

        let report = sweeper.sweep(now).unwrap();
        assert_eq!(report.escalated, 2);

        let history = store.history_entries().unwrap();
        assert_eq!(history.len(), 2);
        assert!(history
            .iter()
            .any(|h| h.previous_priority == Priority::Low && h.new_priority == Priority::Medium));

        let audit = store.audit_entries().unwrap();
        assert_eq!(audit.len(), 2);
        assert!(audit.iter().all(|a| a.action == "escalation"));
        assert!(audit.iter().all(|a| a.actor_id.is_none()));
    }
}
