//! Attempt engine — creating attempt records and slicing the log.

use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

use super::types::*;

static ATTEMPT_NONCE: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// Record attempt
// ---------------------------------------------------------------------------

/// Create a new attempt record stamped with the current time.
///
/// The id is derived from the attempt content, the timestamp and a
/// process-local nonce, so two identical submissions in the same
/// millisecond still get distinct ids.
pub fn record_attempt(
    student: StudentId,
    skill: SkillId,
    score: i64,
    attempts: u32,
    question_id: Option<QuestionId>,
) -> AttemptRecord {
    record_attempt_at(
        student,
        skill,
        score,
        attempts,
        question_id,
        crate::time::now_millis(),
    )
}

/// Create an attempt record with an explicit timestamp (epoch ms).
pub fn record_attempt_at(
    student: StudentId,
    skill: SkillId,
    score: i64,
    attempts: u32,
    question_id: Option<QuestionId>,
    timestamp: i64,
) -> AttemptRecord {
    let nonce = ATTEMPT_NONCE.fetch_add(1, Ordering::Relaxed);
    let question = question_id.as_ref().map(|q| q.0.as_str()).unwrap_or("");
    let id_input = format!(
        "{}:{}:{}:{}:{}:{}",
        student.0, skill.0, question, score, timestamp, nonce
    );
    let id_hash = Sha256::digest(id_input.as_bytes());
    let id_encoded = bs58::encode(&id_hash[..16]).into_string();

    AttemptRecord {
        id: AttemptId(format!("att_{id_encoded}")),
        student_id: student,
        skill_id: skill,
        score,
        timestamp,
        attempts,
        question_id,
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Attempts for `skill`, optionally restricted to one student.
///
/// Records for any other skill (including skills that no longer exist)
/// are simply skipped.
pub fn filter_attempts<'a>(
    results: &'a [AttemptRecord],
    skill: &SkillId,
    student: Option<&StudentId>,
) -> Vec<&'a AttemptRecord> {
    results
        .iter()
        .filter(|r| &r.skill_id == skill && student.map_or(true, |s| &r.student_id == s))
        .collect()
}

/// All attempts by one student, across skills.
pub fn attempts_for_student<'a>(
    results: &'a [AttemptRecord],
    student: &StudentId,
) -> Vec<&'a AttemptRecord> {
    results.iter().filter(|r| &r.student_id == student).collect()
}
