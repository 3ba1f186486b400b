//! Reward engine — matching rules against an attempt's outcome.
//!
//! Everything here is side-effect free, so an admin screen can call it
//! on every keystroke to preview a rule being edited.

use crate::attempt::{filter_attempts, AttemptRecord, StudentId};
use crate::config::Skill;

use super::types::*;

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Whether `rule` fires for `context`.
pub fn rule_matches(rule: &RewardRule, context: &RewardContext) -> bool {
    let Some(actual) = context.value_for(rule.trigger_type) else {
        return false;
    };
    match rule.effective_operator() {
        ConditionOperator::GreaterThan => actual > rule.condition_value,
        ConditionOperator::LessThan => actual < rule.condition_value,
        ConditionOperator::Equals => actual == rule.condition_value,
    }
}

/// Every rule that fires for `context`, in rule-list order.
///
/// Summing the effects and surfacing each message is up to the caller.
pub fn evaluate_rules<'a>(
    context: &RewardContext,
    rules: &'a [RewardRule],
) -> Vec<TriggeredReward<'a>> {
    let triggered: Vec<TriggeredReward<'a>> = rules
        .iter()
        .filter(|rule| rule_matches(rule, context))
        .map(|rule| TriggeredReward {
            rule,
            effect_points: rule.effect_points(),
        })
        .collect();

    log::debug!(
        "{} of {} reward rules fired (score {}, streak {})",
        triggered.len(),
        rules.len(),
        context.score,
        context.streak
    );
    triggered
}

/// Net point adjustment of a set of triggered rules.
pub fn total_adjustment(triggered: &[TriggeredReward<'_>]) -> i64 {
    triggered.iter().map(|t| t.effect_points).sum()
}

// ---------------------------------------------------------------------------
// Context helpers
// ---------------------------------------------------------------------------

/// Raw accuracy percent of a student on a skill: correct records over all
/// records. `None` when there are no attempts.
pub fn accuracy_percent(
    results: &[AttemptRecord],
    skill: &Skill,
    student: &StudentId,
) -> Option<f64> {
    let attempts = filter_attempts(results, &skill.id, Some(student));
    if attempts.is_empty() {
        return None;
    }
    let correct = attempts.iter().filter(|r| r.is_correct()).count();
    Some(correct as f64 / attempts.len() as f64 * 100.0)
}

/// Context for a freshly logged attempt. `results` should already contain
/// `attempt`.
pub fn context_for_attempt(
    attempt: &AttemptRecord,
    streak: u32,
    skill: Option<&Skill>,
    results: &[AttemptRecord],
) -> RewardContext {
    RewardContext {
        score: attempt.score,
        streak,
        difficulty: skill.and_then(|s| s.difficulty),
        accuracy: skill.and_then(|s| accuracy_percent(results, s, &attempt.student_id)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
