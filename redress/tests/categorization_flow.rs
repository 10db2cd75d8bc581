//! Integration tests for the categorization pipeline.
//!
//! Exercises the full predictor → keyword matcher → fallback flow through
//! the public API, with the stock category set and hand-rolled predictor
//! fakes.

use std::sync::Arc;

use async_trait::async_trait;
use redress::{
    seed, AiPredictor, Categorizer, Complaint, ComplaintStatus, ComplaintStore, MemoryStore,
    NullPredictor, Prediction, Priority,
};

/// Predictor that always returns the same prediction.
struct FixedPredictor(Prediction);

#[async_trait]
impl AiPredictor for FixedPredictor {
    async fn predict(&self, _title: &str, _description: &str) -> Option<Prediction> {
        Some(self.0.clone())
    }
}

fn harness(predictor: Arc<dyn AiPredictor>) -> (Arc<MemoryStore>, Categorizer) {
    let store = Arc::new(MemoryStore::with_categories(seed::default_categories()));
    let categorizer = Categorizer::new(store.clone(), store.clone(), store.clone(), predictor);
    (store, categorizer)
}

#[tokio::test]
async fn test_keyword_match_without_prediction() {
    let (store, categorizer) = harness(Arc::new(NullPredictor));
    let mut complaint = Complaint::new("Bathroom issue", "no water in bathroom, tap leaking", 3);

    let outcome = categorizer.categorize(&mut complaint).await.unwrap();

    assert_eq!(outcome.category_name.as_deref(), Some("Water & Plumbing"));
    assert_eq!(outcome.priority, Priority::Medium);
    assert!(!outcome.used_prediction);

    let persisted = store.find(complaint.id).unwrap().unwrap();
    assert_eq!(persisted.status, ComplaintStatus::Categorized);
    assert_eq!(persisted.category_id, Some(1));
    assert_eq!(persisted.priority, Priority::Medium);
    assert_eq!(store.audit_entries().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unmatched_complaint_defaults_to_low_and_submitted() {
    let (store, categorizer) = harness(Arc::new(NullPredictor));
    let mut complaint = Complaint::new("Stuck", "the elevator is stuck between floors", 3);

    let outcome = categorizer.categorize(&mut complaint).await.unwrap();

    assert_eq!(outcome.category_id, None);
    assert_eq!(outcome.priority, Priority::Low);

    let persisted = store.find(complaint.id).unwrap().unwrap();
    assert_eq!(persisted.status, ComplaintStatus::Submitted);
    assert_eq!(persisted.category_id, None);
}

#[tokio::test]
async fn test_ai_category_resolved_case_insensitively() {
    let (_, categorizer) = harness(Arc::new(FixedPredictor(Prediction {
        category: Some("electricity".to_string()),
        priority: Priority::High,
    })));
    // Description deliberately matches no keywords: the AI result must carry.
    let mut complaint = Complaint::new("Odd issue", "the elevator is stuck between floors", 3);

    let outcome = categorizer.categorize(&mut complaint).await.unwrap();

    assert_eq!(outcome.category_name.as_deref(), Some("Electricity"));
    assert_eq!(outcome.category_id, Some(2));
    assert_eq!(outcome.priority, Priority::High);
    assert_eq!(complaint.status, ComplaintStatus::Categorized);
    assert!(outcome.used_prediction);
}

#[tokio::test]
async fn test_unknown_ai_category_falls_back_to_keywords_keeping_ai_priority() {
    // "Electrical" does not exist in the store ("Electricity" does); the
    // category comes from keyword matching, the priority from the AI.
    let (_, categorizer) = harness(Arc::new(FixedPredictor(Prediction {
        category: Some("Electrical".to_string()),
        priority: Priority::Critical,
    })));
    let mut complaint = Complaint::new("Bathroom issue", "no water in bathroom, tap leaking", 3);

    let outcome = categorizer.categorize(&mut complaint).await.unwrap();

    assert_eq!(outcome.category_name.as_deref(), Some("Water & Plumbing"));
    assert_eq!(outcome.priority, Priority::Critical);
    assert_eq!(complaint.status, ComplaintStatus::Categorized);
}

#[tokio::test]
async fn test_ai_priority_kept_even_without_any_category() {
    let (_, categorizer) = harness(Arc::new(FixedPredictor(Prediction {
        category: None,
        priority: Priority::Critical,
    })));
    let mut complaint = Complaint::new("Odd issue", "the elevator is stuck between floors", 3);

    let outcome = categorizer.categorize(&mut complaint).await.unwrap();

    assert_eq!(outcome.category_id, None);
    assert_eq!(outcome.priority, Priority::Critical);
    assert_eq!(complaint.status, ComplaintStatus::Submitted);
}
