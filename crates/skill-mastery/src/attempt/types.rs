//! Data structures for the attempt log.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Unique identifier for an attempt record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub String);

/// Identifier of a learner.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier of a skill.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub String);

/// Identifier of a question inside a skill's bank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

macro_rules! string_id {
    ($($name:ident),*) => {$(
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    )*};
}

string_id!(AttemptId, StudentId, SkillId, QuestionId);

// ---------------------------------------------------------------------------
// Attempt record
// ---------------------------------------------------------------------------

/// One scored answer submission. Immutable once logged.
///
/// A positive `score` is a correct answer worth that much XP; zero or a
/// negative value is an incorrect answer or a penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: AttemptId,
    pub student_id: StudentId,
    pub skill_id: SkillId,
    pub score: i64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Retry count within the submission.
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
}

impl AttemptRecord {
    /// Whether this attempt counts as a correct answer.
    pub fn is_correct(&self) -> bool {
        self.score > 0
    }

    /// Key used to dedupe correct answers: the question id, or a synthetic
    /// per-record key for attempts logged without one.
    pub fn completion_key(&self) -> String {
        match &self.question_id {
            Some(q) => q.0.clone(),
            None => format!("legacy-{}", self.id.0),
        }
    }
}
