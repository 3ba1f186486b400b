//! Attempt log — immutable records of scored answer submissions.
//!
//! The attempt module provides:
//! - Identifier newtypes for students, skills, questions and attempts
//! - Attempt record creation with content-derived ids
//! - Log slicing by skill and student

pub mod engine;
pub mod types;

pub use types::{AttemptId, AttemptRecord, QuestionId, SkillId, StudentId};

pub use engine::{attempts_for_student, filter_attempts, record_attempt, record_attempt_at};
