//! Mastery evaluation — progress, mastery and rank of a (skill, student) pair.
//!
//! The mastery module provides:
//! - Requirement resolution (skill override, else system default)
//! - The QUESTIONS strategy: distinct correct answers, percentage targets,
//!   accuracy gate with rank cap
//! - The SCORE strategy: signed XP sum
//! - Rank lookup on the ladder
//! - The set of completed question ids

pub mod engine;
pub mod questions;
mod score;
pub mod types;

pub use types::{MasteryStatus, MasteryStrategy};

pub use engine::{evaluate, evaluate_all, mastered_count, resolve_requirement};
pub use questions::{distinct_correct_count, question_target};
