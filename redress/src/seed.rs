//! Stock category reference data.
//!
//! Seeded into a fresh store by the daemon; also the fixture set used by
//! integration tests.

use crate::model::{Category, Priority};

/// The default category set with keyword lists and default priorities.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            1,
            "Water & Plumbing",
            &[
                "water",
                "leak",
                "leakage",
                "pipe",
                "tap",
                "flush",
                "toilet",
                "washroom",
                "bathroom",
                "geyser",
                "no water",
                "low pressure",
                "overflow",
                "drain",
            ],
            Priority::Medium,
        ),
        Category::new(
            2,
            "Electricity",
            &[
                "electric",
                "electricity",
                "power",
                "no power",
                "switch",
                "socket",
                "plug",
                "short circuit",
                "shock",
                "sparks",
                "voltage",
                "light",
                "fan",
            ],
            Priority::High,
        ),
        Category::new(
            3,
            "Internet / Network",
            &[
                "wifi",
                "internet",
                "network",
                "slow internet",
                "no internet",
                "router",
                "connection",
                "lan",
            ],
            Priority::Medium,
        ),
        Category::new(
            4,
            "Cleaning & Hygiene",
            &[
                "clean",
                "cleaning",
                "dirty",
                "garbage",
                "trash",
                "smell",
                "odor",
                "toilet dirty",
                "washroom dirty",
                "mosquito",
                "insects",
                "rats",
            ],
            Priority::Low,
        ),
        Category::new(
            5,
            "Security & Safety",
            &[
                "theft",
                "stolen",
                "lost",
                "security",
                "unauthorized",
                "intruder",
                "fight",
                "gate",
                "guard",
                "unsafe",
                "lock broken",
            ],
            Priority::High,
        ),
        Category::new(
            6,
            "Room & Furniture",
            &[
                "bed",
                "chair",
                "table",
                "cupboard",
                "locker",
                "broken bed",
                "mattress",
                "window",
                "door",
                "lock",
                "curtain",
            ],
            Priority::Low,
        ),
        Category::new(
            7,
            "AC / Ventilation",
            &[
                "ac",
                "air conditioner",
                "cooling",
                "not cooling",
                "fan not working",
                "ventilation",
                "hot room",
            ],
            Priority::Medium,
        ),
        Category::new(
            8,
            "Food & Mess",
            &[
                "food",
                "mess",
                "canteen",
                "bad food",
                "quality",
                "stale",
                "raw food",
                "hygiene",
                "food poisoning",
            ],
            Priority::Medium,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique_and_ascending() {
        let cats = default_categories();
        let mut ids: Vec<u32> = cats.iter().map(|c| c.id).collect();
        let original = ids.clone();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, original);
    }

    #[test]
    fn test_seed_has_no_empty_keyword_lists() {
        for cat in default_categories() {
            assert!(!cat.keywords.is_empty(), "{} has no keywords", cat.name);
        }
    }
}
