//! Stats engine — building and refreshing the cached student aggregate.

use chrono::{Local, TimeZone};

use crate::attempt::{attempts_for_student, AttemptRecord, StudentId};
use crate::config::{RankLadder, Skill, SystemConfig};
use crate::mastery::{self, MasteryStatus};

use super::types::StudentStats;

/// Rebuild a student's stats from the full attempt log, days cut in `tz`.
///
/// Attempts are folded in timestamp order, so the cached streak matches a
/// full recompute.
pub fn recompute_stats_in<Tz: TimeZone>(
    student: &StudentId,
    results: &[AttemptRecord],
    skills: &[Skill],
    config: &SystemConfig,
    ladder: &RankLadder,
    tz: &Tz,
) -> StudentStats {
    let mut attempts = attempts_for_student(results, student);
    attempts.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    let mut stats = StudentStats::new(student.clone());
    for record in attempts {
        stats.apply_in(record, tz);
    }
    for skill in skills {
        let status = mastery::evaluate(skill, Some(student), results, config, ladder);
        stats.set_mastered(&skill.id, status.is_mastered);
    }

    log::debug!(
        "recomputed stats for {}: {} attempts, {} XP, {} mastered",
        student,
        stats.attempt_count(),
        stats.total_xp(),
        stats.mastered_count()
    );
    stats
}

/// Rebuild a student's stats from the full attempt log (local days).
pub fn recompute_stats(
    student: &StudentId,
    results: &[AttemptRecord],
    skills: &[Skill],
    config: &SystemConfig,
    ladder: &RankLadder,
) -> StudentStats {
    recompute_stats_in(student, results, skills, config, ladder, &Local)
}

/// Per-attempt cache update: fold `record` in and re-evaluate mastery of
/// its skill. `results` must already contain `record`.
pub fn update_after_attempt_in<Tz: TimeZone>(
    stats: &mut StudentStats,
    record: &AttemptRecord,
    skill: &Skill,
    results: &[AttemptRecord],
    config: &SystemConfig,
    ladder: &RankLadder,
    tz: &Tz,
) -> MasteryStatus {
    stats.apply_in(record, tz);
    let status = mastery::evaluate(skill, Some(&record.student_id), results, config, ladder);
    stats.set_mastered(&skill.id, status.is_mastered);
    status
}

/// Per-attempt cache update with local days.
pub fn update_after_attempt(
    stats: &mut StudentStats,
    record: &AttemptRecord,
    skill: &Skill,
    results: &[AttemptRecord],
    config: &SystemConfig,
    ladder: &RankLadder,
) -> MasteryStatus {
    update_after_attempt_in(stats, record, skill, results, config, ladder, &Local)
}
