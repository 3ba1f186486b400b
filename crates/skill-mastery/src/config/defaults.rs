//! Built-in defaults used whenever a document is missing.

use super::types::{MasteryRequirement, RankTier};

pub const DEFAULT_QUESTION_TARGET: u32 = 10;
pub const DEFAULT_MIN_ACCURACY: f64 = 60.0;

/// `{type: QUESTIONS, value: 10, minAccuracy: 60}`
pub fn default_requirement() -> MasteryRequirement {
    MasteryRequirement::questions(DEFAULT_QUESTION_TARGET).with_min_accuracy(DEFAULT_MIN_ACCURACY)
}

fn tier(name: &str, threshold: u64, icon: &str, color: &str, description: &str) -> RankTier {
    RankTier {
        name: name.to_string(),
        threshold,
        icon: icon.to_string(),
        color: color.to_string(),
        description: description.to_string(),
    }
}

/// Default five-tier ladder, ascending.
pub fn default_rank_tiers() -> Vec<RankTier> {
    vec![
        tier("Novice", 0, "seedling", "#9ca3af", "Just getting started"),
        tier("Apprentice", 100, "book", "#60a5fa", "Building the basics"),
        tier("Scholar", 300, "scroll", "#34d399", "Solid working knowledge"),
        tier("Expert", 600, "star", "#f59e0b", "Consistently accurate"),
        tier("Master", 1000, "crown", "#a855f7", "Skill fully mastered"),
    ]
}
