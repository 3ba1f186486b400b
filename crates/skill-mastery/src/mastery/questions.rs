//! QUESTIONS strategy — count distinct correctly answered questions.

use std::collections::{BTreeSet, HashSet};

use crate::attempt::AttemptRecord;

use super::types::StrategyOutcome;

/// Settings of a QUESTIONS requirement after resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QuestionsRequirement {
    pub value: u32,
    pub min_accuracy: Option<f64>,
    pub is_percentage: bool,
}

/// Effective question target. Never below 1.
///
/// A percentage target needs a known bank size; without one, `value` is
/// taken as a plain count.
pub fn question_target(value: u32, is_percentage: bool, bank_size: Option<u32>) -> u32 {
    let target = match (is_percentage, bank_size) {
        (true, Some(bank)) => (u64::from(value) * u64::from(bank)).div_ceil(100),
        _ => u64::from(value),
    };
    target.clamp(1, u64::from(u32::MAX)) as u32
}

/// Number of distinct correct answers.
///
/// Once any correct attempt carries a question id, answers are deduped by
/// question id, with a synthetic per-record key for the ones that don't.
/// A log with no question ids at all counts every correct record once.
pub fn distinct_correct_count(correct: &[&AttemptRecord]) -> usize {
    if correct.iter().any(|r| r.question_id.is_some()) {
        correct
            .iter()
            .map(|r| r.completion_key())
            .collect::<HashSet<_>>()
            .len()
    } else {
        correct.len()
    }
}

pub(crate) fn evaluate(
    attempts: &[&AttemptRecord],
    requirement: QuestionsRequirement,
    bank_size: Option<u32>,
    master_threshold: u64,
) -> StrategyOutcome {
    let correct: Vec<&AttemptRecord> = attempts.iter().copied().filter(|r| r.is_correct()).collect();
    let raw_correct = correct.len();
    let correct_count = distinct_correct_count(&correct);
    let completed_question_ids: BTreeSet<_> =
        correct.iter().filter_map(|r| r.question_id.clone()).collect();

    let target = question_target(requirement.value, requirement.is_percentage, bank_size);
    let progress = (correct_count as f64 / f64::from(target) * 100.0).min(100.0);
    let mut is_mastered = correct_count >= target as usize;
    let equivalent_xp = progress / 100.0 * master_threshold as f64;

    let total_attempts = attempts.len();
    let accuracy = (total_attempts > 0).then(|| raw_correct as f64 / total_attempts as f64 * 100.0);

    let mut rank_capped = false;
    if let (Some(min), Some(acc)) = (requirement.min_accuracy, accuracy) {
        if acc < min {
            log::debug!("accuracy {acc:.1}% below required {min}%; mastery withheld");
            is_mastered = false;
            rank_capped = true;
        }
    }

    StrategyOutcome {
        correct_count,
        target: i64::from(target),
        progress,
        progress_label: format!("{correct_count} / {target} Questions"),
        is_mastered,
        equivalent_xp,
        accuracy,
        rank_capped,
        completed_question_ids,
    }
}
