//! Mastery engine — requirement resolution, strategy dispatch, rank lookup.

use crate::attempt::{filter_attempts, AttemptRecord, StudentId};
use crate::config::{MasteryRequirement, RankLadder, Skill, SystemConfig};

use super::questions::{self, QuestionsRequirement};
use super::score;
use super::types::*;

// ---------------------------------------------------------------------------
// Requirement resolution
// ---------------------------------------------------------------------------

/// The requirement in force for a skill: its own override, else the
/// system default. A missing skill gets the system default.
pub fn resolve_requirement<'a>(
    skill: Option<&'a Skill>,
    config: &'a SystemConfig,
) -> &'a MasteryRequirement {
    skill
        .and_then(|s| s.mastery_requirements.as_ref())
        .unwrap_or(&config.default_mastery_requirements)
}

// ---------------------------------------------------------------------------
// Evaluate
// ---------------------------------------------------------------------------

/// Compute the mastery status of `skill` from the attempt log.
///
/// `student` narrows the log to one learner; `None` evaluates every
/// attempt for the skill. Pure and idempotent.
pub fn evaluate(
    skill: &Skill,
    student: Option<&StudentId>,
    results: &[AttemptRecord],
    config: &SystemConfig,
    ladder: &RankLadder,
) -> MasteryStatus {
    let requirement = resolve_requirement(Some(skill), config);
    let attempts = filter_attempts(results, &skill.id, student);

    let (strategy, outcome) = match *requirement {
        MasteryRequirement::Questions {
            value,
            min_accuracy,
            is_percentage,
        } => (
            MasteryStrategy::Questions,
            questions::evaluate(
                &attempts,
                QuestionsRequirement {
                    value,
                    min_accuracy,
                    is_percentage,
                },
                skill.question_bank_size,
                ladder.master().threshold,
            ),
        ),
        MasteryRequirement::Score { value, .. } => {
            (MasteryStrategy::Score, score::evaluate(&attempts, value))
        }
    };

    let mut rank_index = ladder.resolve(outcome.equivalent_xp);
    if outcome.rank_capped {
        rank_index = rank_index.min(ladder.below_top());
    }
    let rank = ladder.tiers()[rank_index].clone();

    log::debug!(
        "skill {} ({}): {} -> rank '{}'{}",
        skill.id,
        requirement.strategy_name(),
        outcome.progress_label,
        rank.name,
        if outcome.is_mastered { ", mastered" } else { "" }
    );

    MasteryStatus {
        skill_id: skill.id.clone(),
        strategy,
        total_score: attempts.iter().map(|r| r.score).sum(),
        progress: outcome.progress,
        progress_label: outcome.progress_label,
        is_mastered: outcome.is_mastered,
        rank_index,
        rank,
        correct_count: outcome.correct_count,
        target: outcome.target,
        accuracy: outcome.accuracy,
        equivalent_xp: outcome.equivalent_xp,
        completed_question_ids: outcome.completed_question_ids,
    }
}

/// Evaluate every skill for one student, in catalog order.
pub fn evaluate_all(
    skills: &[Skill],
    student: &StudentId,
    results: &[AttemptRecord],
    config: &SystemConfig,
    ladder: &RankLadder,
) -> Vec<MasteryStatus> {
    skills
        .iter()
        .map(|skill| evaluate(skill, Some(student), results, config, ladder))
        .collect()
}

/// Number of skills the student has mastered.
pub fn mastered_count(
    skills: &[Skill],
    student: &StudentId,
    results: &[AttemptRecord],
    config: &SystemConfig,
    ladder: &RankLadder,
) -> usize {
    skills
        .iter()
        .filter(|skill| evaluate(skill, Some(student), results, config, ladder).is_mastered)
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
