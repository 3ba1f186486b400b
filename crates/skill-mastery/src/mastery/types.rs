//! Data structures for mastery evaluation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::attempt::{QuestionId, SkillId};
use crate::config::RankTier;

/// Which requirement strategy produced a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasteryStrategy {
    Questions,
    Score,
}

/// Derived mastery state of one (skill, student) pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryStatus {
    pub skill_id: SkillId,
    pub strategy: MasteryStrategy,
    /// Signed sum of every attempt score for the skill.
    pub total_score: i64,
    /// Percent toward the requirement, 0-100.
    pub progress: f64,
    pub progress_label: String,
    pub is_mastered: bool,
    /// Index into the ascending rank ladder.
    pub rank_index: usize,
    pub rank: RankTier,
    /// Distinct correct answers (QUESTIONS) or raw correct records (SCORE).
    pub correct_count: usize,
    /// Effective target after clamping and percentage conversion.
    pub target: i64,
    /// Raw accuracy percent; only computed in QUESTIONS mode with attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// XP-equivalent used for the rank lookup.
    pub equivalent_xp: f64,
    pub completed_question_ids: BTreeSet<QuestionId>,
}

/// Result of running one strategy, before rank resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StrategyOutcome {
    pub correct_count: usize,
    pub target: i64,
    pub progress: f64,
    pub progress_label: String,
    pub is_mastered: bool,
    pub equivalent_xp: f64,
    pub accuracy: Option<f64>,
    /// The accuracy gate failed: the top tier is out of reach.
    pub rank_capped: bool,
    pub completed_question_ids: BTreeSet<QuestionId>,
}
