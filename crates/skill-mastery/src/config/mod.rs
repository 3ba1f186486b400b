//! Configuration documents — requirements, rank ladder, skills.
//!
//! All documents are admin-owned and last-write-wins. Changing one
//! reinterprets the whole attempt history on the next evaluation.

pub mod defaults;
pub mod ladder;
pub mod types;

pub use ladder::RankLadder;
pub use types::{MasteryRequirement, RankTier, Skill, SystemConfig};
