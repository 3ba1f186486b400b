//! Daily practice streaks.
//!
//! Two paths that must always agree: a full recompute over the set of
//! active days, and an incremental `StreakState` updated per attempt.

pub mod engine;
pub mod types;

pub use types::StreakState;

pub use engine::{
    compute_streak, compute_streak_in, current_streak, is_alive, streak_from_days, update_streak,
    update_streak_in,
};
