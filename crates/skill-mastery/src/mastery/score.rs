//! SCORE strategy (legacy) — cumulative XP sum.

use std::collections::BTreeSet;

use crate::attempt::AttemptRecord;

use super::types::StrategyOutcome;

pub(crate) fn evaluate(attempts: &[&AttemptRecord], value: i64) -> StrategyOutcome {
    let total: i64 = attempts.iter().map(|r| r.score).sum();
    let target = value.max(1);
    let progress = (total as f64 / target as f64 * 100.0).clamp(0.0, 100.0);

    StrategyOutcome {
        correct_count: attempts.iter().filter(|r| r.is_correct()).count(),
        target,
        progress,
        progress_label: format!("{total} / {target} XP"),
        is_mastered: total >= target,
        equivalent_xp: total as f64,
        accuracy: None,
        rank_capped: false,
        completed_question_ids: BTreeSet::new(),
    }
}
