//! Keyword matching of complaint text against the category set.
//!
//! Matching is plain substring containment over normalized text. Categories
//! are scanned in ascending-id order and the first keyword hit wins, so the
//! result is deterministic regardless of store iteration order.

use crate::model::{Category, Priority};

/// Lowercase, collapse whitespace runs to a single space, and trim.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of a successful keyword match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category_id: u32,
    pub category_name: String,
    /// The matched category's default priority.
    pub priority: Priority,
}

/// First category (ascending id) with a keyword occurring in `normalized`.
///
/// `normalized` must already have gone through [`normalize`]; keywords are
/// lowercased on the fly. Returns `None` when nothing hits.
pub fn match_category(categories: &[Category], normalized: &str) -> Option<CategoryMatch> {
    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by_key(|c| c.id);

    for category in ordered {
        if category.keywords.is_empty() {
            continue;
        }
        let hit = category
            .keywords
            .iter()
            .find(|kw| normalized.contains(&kw.to_lowercase()));
        if let Some(kw) = hit {
            tracing::debug!(
                "keyword '{}' matched category '{}' (id {})",
                kw,
                category.name,
                category.id
            );
            return Some(CategoryMatch {
                category_id: category.id,
                category_name: category.name.clone(),
                priority: category.default_priority,
            });
        }
    }
    None
}
