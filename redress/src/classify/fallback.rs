//! Priority fallback for complaints no category claims.
//!
//! Table order encodes a severity-first tie-break: a text containing both a
//! high-tier and a medium-tier keyword is tiered high.

use crate::model::Priority;

/// Keyword table scanned in declared order; first tier with a hit wins.
const FALLBACK_TIERS: &[(Priority, &[&str])] = &[
    (
        Priority::High,
        &[
            "electric",
            "electricity",
            "fire",
            "shock",
            "security",
            "theft",
            "safety",
            "emergency",
        ],
    ),
    (
        Priority::Medium,
        &[
            "water",
            "leak",
            "cleaning",
            "maintenance",
            "repair",
            "broken",
            "damage",
        ],
    ),
    (Priority::Low, &[]),
];

/// Infer a priority tier from normalized text when no category matched.
/// Defaults to `Low` when nothing in the table hits.
pub fn fallback_priority(normalized: &str) -> Priority {
    for (tier, keywords) in FALLBACK_TIERS {
        if keywords.iter().any(|kw| normalized.contains(kw)) {
            return *tier;
        }
    }
    Priority::Low
}
