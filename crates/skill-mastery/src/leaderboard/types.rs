//! Data structures for leaderboards.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attempt::{AttemptRecord, StudentId};

/// What a leaderboard is sorted by.
///
/// Serialized as `{"masteredCount": 5}` or `{"progressPercent": 40.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaderboardScore {
    /// Aggregate mode: skills mastered.
    MasteredCount(usize),
    /// Per-skill mode: progress on one skill, 0-100.
    ProgressPercent(f64),
}

/// One row of a ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: StudentId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub score: LeaderboardScore,
    /// 1-based position after sorting. Ties get distinct positions.
    pub rank: usize,
}

/// Source of attempt records for a student.
///
/// Implementations may return more than the student's own records;
/// evaluation filters by student anyway.
pub trait ResultsProvider {
    fn results_for(&self, student: &StudentId) -> Cow<'_, [AttemptRecord]>;
}

/// A whole in-memory log serves every student.
impl ResultsProvider for [AttemptRecord] {
    fn results_for(&self, _student: &StudentId) -> Cow<'_, [AttemptRecord]> {
        Cow::Borrowed(self)
    }
}

impl ResultsProvider for Vec<AttemptRecord> {
    fn results_for(&self, _student: &StudentId) -> Cow<'_, [AttemptRecord]> {
        Cow::Borrowed(self.as_slice())
    }
}

/// Logs pre-grouped by student.
impl ResultsProvider for HashMap<StudentId, Vec<AttemptRecord>> {
    fn results_for(&self, student: &StudentId) -> Cow<'_, [AttemptRecord]> {
        Cow::Borrowed(self.get(student).map(Vec::as_slice).unwrap_or(&[]))
    }
}
