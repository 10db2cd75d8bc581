//! Categorization orchestration — composes the AI predictor with keyword
//! matching and the priority fallback to settle a new complaint's category,
//! priority, and status.

use std::sync::Arc;

use chrono::Utc;

use super::fallback::fallback_priority;
use super::matcher::{match_category, normalize};
use crate::model::{AuditLogEntry, Complaint, ComplaintStatus, Priority};
use crate::predictor::AiPredictor;
use crate::store::{AuditSink, CategoryStore, ComplaintStore, StoreResult};

/// What a categorization pass decided.
#[derive(Debug, Clone)]
pub struct CategorizeOutcome {
    pub category_id: Option<u32>,
    pub category_name: Option<String>,
    pub priority: Priority,
    pub status: ComplaintStatus,
    /// Whether the AI predictor contributed anything to the decision.
    pub used_prediction: bool,
}

/// Decides category + priority + status for newly submitted complaints.
///
/// The predictor is an injected dependency built once and shared across
/// calls; its failures are absorbed here and never surface to the caller.
pub struct Categorizer {
    categories: Arc<dyn CategoryStore>,
    complaints: Arc<dyn ComplaintStore>,
    audit: Arc<dyn AuditSink>,
    predictor: Arc<dyn AiPredictor>,
}

impl Categorizer {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        complaints: Arc<dyn ComplaintStore>,
        audit: Arc<dyn AuditSink>,
        predictor: Arc<dyn AiPredictor>,
    ) -> Self {
        Self {
            categories,
            complaints,
            audit,
            predictor,
        }
    }

    /// Categorize `complaint`, persist it, and append one audit entry.
    ///
    /// Resolution order: AI-predicted category (when its name is known to
    /// the store), then keyword match, then the priority fallback table.
    /// An AI prediction's priority is final whenever a prediction exists at
    /// all; keyword/fallback priority applies only without one.
    pub async fn categorize(&self, complaint: &mut Complaint) -> StoreResult<CategorizeOutcome> {
        let prediction = self
            .predictor
            .predict(&complaint.title, &complaint.description)
            .await;

        let mut chosen: Option<(u32, String)> = None;
        let mut priority = Priority::default();

        if let Some(p) = &prediction {
            priority = p.priority;
            if let Some(name) = &p.category {
                if let Some(cat) = self.categories.find_by_name(name)? {
                    chosen = Some((cat.id, cat.name));
                }
            }
        }

        if chosen.is_none() {
            let text = normalize(&complaint.description);
            match match_category(&self.categories.all()?, &text) {
                Some(m) => {
                    if prediction.is_none() {
                        priority = m.priority;
                    }
                    chosen = Some((m.category_id, m.category_name));
                }
                None => {
                    if prediction.is_none() {
                        priority = fallback_priority(&text);
                    }
                }
            }
        }

        let old_status = complaint.status;
        complaint.priority = priority;
        complaint.status = match &chosen {
            Some((id, _)) => {
                complaint.category_id = Some(*id);
                ComplaintStatus::Categorized
            }
            None => ComplaintStatus::Submitted,
        };
        complaint.updated_at = Utc::now();
        self.complaints.save(complaint)?;

        let message = match &chosen {
            Some((_, name)) => format!("Auto-categorized as '{}' with priority {}", name, priority),
            None => format!("No category matched; priority {}", priority),
        };
        self.audit.append(AuditLogEntry::new(
            complaint.id,
            None,
            "categorization",
            Some(old_status.to_string()),
            Some(complaint.status.to_string()),
            Some(message),
            complaint.updated_at,
        ))?;

        tracing::info!(
            "categorized complaint {}: category={:?} priority={} status={}",
            complaint.id,
            chosen.as_ref().map(|(_, name)| name.as_str()),
            priority,
            complaint.status
        );

        Ok(CategorizeOutcome {
            category_id: chosen.as_ref().map(|(id, _)| *id),
            category_name: chosen.map(|(_, name)| name),
            priority,
            status: complaint.status,
            used_prediction: prediction.is_some(),
        })
    }
}
