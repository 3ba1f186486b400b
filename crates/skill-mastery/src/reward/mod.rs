//! Reward rules — bonus and penalty points per attempt.
//!
//! The reward module provides:
//! - The `RewardRule` document and its authoring-time validation
//! - Rule matching against a `RewardContext`
//! - Net adjustment and context helpers for the scoring flow

pub mod engine;
pub mod types;

pub use types::{
    ConditionOperator, EffectType, RewardContext, RewardRule, RuleId, TriggerType, TriggeredReward,
};

pub use engine::{accuracy_percent, context_for_attempt, evaluate_rules, rule_matches, total_adjustment};
