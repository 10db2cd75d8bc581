//! Domain types — complaints, categories, and their append-only trails.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority tiers, ordered from least to most urgent.
///
/// The ordering is load-bearing: escalation moves exactly one tier up and
/// clamps at `Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Next tier up, clamped at `Critical`.
    pub fn escalate(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Critical,
            Self::Critical => Self::Critical,
        }
    }

    /// Parse a free-form tier string (predictor output, config values).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Lifecycle status of a complaint.
///
/// The categorization/escalation core only ever moves `Submitted` →
/// `Categorized`; the later stages belong to the assignment workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Submitted,
    Categorized,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    /// Whether the complaint still counts as open for SLA purposes.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "submitted"),
            Self::Categorized => write!(f, "categorized"),
            Self::Assigned => write!(f, "assigned"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Resolved => write!(f, "resolved"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Immutable reference data mapping keywords to a category and its default
/// priority. Created by seeding or admin tooling; read-only to this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    /// Case-insensitive keywords matched against complaint text.
    pub keywords: Vec<String>,
    pub default_priority: Priority,
}

impl Category {
    pub fn new(id: u32, name: &str, keywords: &[&str], default_priority: Priority) -> Self {
        Self {
            id,
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            default_priority,
        }
    }
}

/// The mutable root entity of the grievance workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Option<u32>,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub location: Option<String>,
    /// Monotonic: once set by an escalation sweep it is never reset here.
    pub is_escalated: bool,
    pub escalated_at: Option<DateTime<Utc>>,
    pub escalation_reason: Option<String>,
    /// SLA window stamped at creation. The sweep currently works off a
    /// global window instead (see DESIGN.md).
    pub sla_days: u32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Create a freshly submitted complaint with its SLA window stamped.
    pub fn new(title: &str, description: &str, sla_days: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            category_id: None,
            priority: Priority::default(),
            status: ComplaintStatus::Submitted,
            location: None,
            is_escalated: false,
            escalated_at: None,
            escalation_reason: None,
            sla_days,
            due_date: now + Duration::days(i64::from(sla_days)),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Append-only record of a state-changing action on a complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub complaint_id: Uuid,
    /// `None` for system-initiated actions (categorization, escalation).
    pub actor_id: Option<u32>,
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(
        complaint_id: Uuid,
        actor_id: Option<u32>,
        action: &str,
        old_value: Option<String>,
        new_value: Option<String>,
        message: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            complaint_id,
            actor_id,
            action: action.to_string(),
            old_value,
            new_value,
            message,
            created_at,
        }
    }
}

/// Append-only record of one escalation event, kept separately from the
/// audit log for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationHistoryEntry {
    pub complaint_id: Uuid,
    pub previous_priority: Priority,
    pub new_priority: Priority,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl EscalationHistoryEntry {
    pub fn new(
        complaint_id: Uuid,
        previous_priority: Priority,
        new_priority: Priority,
        reason: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            complaint_id,
            previous_priority,
            new_priority,
            reason: reason.to_string(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_escalation_ladder() {
        assert_eq!(Priority::Low.escalate(), Priority::Medium);
        assert_eq!(Priority::Medium.escalate(), Priority::High);
        assert_eq!(Priority::High.escalate(), Priority::Critical);
        assert_eq!(Priority::Critical.escalate(), Priority::Critical);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("critical"), Some(Priority::Critical));
        assert_eq!(Priority::parse("  High "), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_status_openness() {
        assert!(ComplaintStatus::Submitted.is_open());
        assert!(ComplaintStatus::InProgress.is_open());
        assert!(!ComplaintStatus::Resolved.is_open());
        assert!(!ComplaintStatus::Closed.is_open());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: ComplaintStatus = serde_json::from_str("\"categorized\"").unwrap();
        assert_eq!(back, ComplaintStatus::Categorized);
    }

    #[test]
    fn test_new_complaint_defaults() {
        let c = Complaint::new("No hot water", "The geyser is broken", 3);
        assert_eq!(c.status, ComplaintStatus::Submitted);
        assert_eq!(c.priority, Priority::Medium);
        assert!(!c.is_escalated);
        assert_eq!(c.due_date - c.created_at, Duration::days(3));
    }
}
