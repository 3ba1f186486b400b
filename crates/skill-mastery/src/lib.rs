//! SkillMastery — mastery, progression and reward evaluation for learners.
//!
//! Turns an append-only log of practice attempts into per-skill mastery
//! status, rank tiers, daily practice streaks, rule-driven bonus and
//! penalty points, and grade leaderboards. Every evaluator is a pure
//! function of its inputs; persistence lives in [`storage`].

pub mod attempt;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod mastery;
pub mod reward;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod time;

// Re-export primary types
pub use attempt::{AttemptId, AttemptRecord, QuestionId, SkillId, StudentId};
pub use config::{MasteryRequirement, RankLadder, RankTier, Skill, SystemConfig};
pub use error::{MasteryError, Result};
pub use mastery::{MasteryStatus, MasteryStrategy};

// Re-export streak and stats types
pub use stats::{StudentProfile, StudentStats};
pub use streak::StreakState;

// Re-export reward types
pub use reward::{
    ConditionOperator, EffectType, RewardContext, RewardRule, RuleId, TriggerType, TriggeredReward,
};

// Re-export leaderboard types
pub use leaderboard::{LeaderboardEntry, LeaderboardScore, ResultsProvider};

// Re-export stores
pub use storage::{ConfigStore, FileResultStore, MemoryResultStore, ProfileStore, ResultStore};
