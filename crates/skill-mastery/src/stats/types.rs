//! Data structures for student profiles and the cached stats aggregate.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::attempt::{AttemptId, AttemptRecord, SkillId, StudentId};
use crate::streak::StreakState;

// ---------------------------------------------------------------------------
// Student profile
// ---------------------------------------------------------------------------

/// A learner as shown on dashboards and leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: StudentId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub grade: String,
}

impl StudentProfile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            id: StudentId::new(id),
            display_name: display_name.into(),
            avatar: None,
            grade: grade.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Student stats
// ---------------------------------------------------------------------------

/// Cached per-student aggregate over the attempt log.
///
/// Built from attempt ids and day sets, so applying an attempt twice or
/// merging the same snapshot twice changes nothing beyond the streak repair
/// described on `merge`. The log stays the source of truth;
/// `stats::recompute_stats` rebuilds this from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub student_id: StudentId,
    /// XP contributed by each attempt.
    #[serde(default)]
    pub xp_by_attempt: BTreeMap<AttemptId, i64>,
    #[serde(default)]
    pub active_days: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub mastered_skills: BTreeSet<SkillId>,
    #[serde(default)]
    pub streak: StreakState,
}

impl StudentStats {
    pub fn new(student_id: StudentId) -> Self {
        Self {
            student_id,
            xp_by_attempt: BTreeMap::new(),
            active_days: BTreeSet::new(),
            mastered_skills: BTreeSet::new(),
            streak: StreakState::new(),
        }
    }

    pub fn total_xp(&self) -> i64 {
        self.xp_by_attempt.values().sum()
    }

    pub fn attempt_count(&self) -> usize {
        self.xp_by_attempt.len()
    }

    pub fn mastered_count(&self) -> usize {
        self.mastered_skills.len()
    }

    /// Streak shown on `today`.
    pub fn streak_as_of(&self, today: NaiveDate) -> u32 {
        self.streak.current_as_of(today)
    }

    /// Fold one attempt into the aggregate, days cut in `tz`.
    ///
    /// Returns `false` if the attempt was already counted or belongs to
    /// another student.
    pub fn apply_in<Tz: TimeZone>(&mut self, record: &AttemptRecord, tz: &Tz) -> bool {
        if record.student_id != self.student_id {
            log::warn!(
                "attempt {} for {} ignored by stats of {}",
                record.id,
                record.student_id,
                self.student_id
            );
            return false;
        }
        if self.xp_by_attempt.contains_key(&record.id) {
            return false;
        }

        self.xp_by_attempt.insert(record.id.clone(), record.score);
        if let Some(day) = crate::time::day_key_in(record.timestamp, tz) {
            self.active_days.insert(day);
            self.streak.record_day(day);
        }
        true
    }

    /// Fold one attempt into the aggregate, days cut at local midnight.
    pub fn apply(&mut self, record: &AttemptRecord) -> bool {
        self.apply_in(record, &chrono::Local)
    }

    /// Record whether a skill is currently mastered.
    pub fn set_mastered(&mut self, skill: &SkillId, mastered: bool) {
        if mastered {
            self.mastered_skills.insert(skill.clone());
        } else {
            self.mastered_skills.remove(skill);
        }
    }

    /// Union another snapshot of the same student into this one.
    ///
    /// The streak is rebuilt from the merged day set, which also repairs a
    /// streak that skipped a backdated day. So `a.merge(&a)` equals `a` only
    /// once `a` carries a rebuilt streak; after one merge the result is
    /// commutative, associative and idempotent. Mastery only grows here; a
    /// skill lost after a config change is dropped by recompute.
    pub fn merge(&mut self, other: &StudentStats) {
        if other.student_id != self.student_id {
            log::warn!(
                "refusing to merge stats of {} into {}",
                other.student_id,
                self.student_id
            );
            return;
        }
        for (id, xp) in &other.xp_by_attempt {
            self.xp_by_attempt.entry(id.clone()).or_insert(*xp);
        }
        self.active_days.extend(other.active_days.iter().copied());
        self.mastered_skills
            .extend(other.mastered_skills.iter().cloned());
        self.streak = StreakState::from_days(&self.active_days);
    }
}
