//! Student profiles and the cached per-student aggregate.
//!
//! The aggregate is an optimization over the attempt log, passed around
//! explicitly and always repairable by a full recompute.

pub mod engine;
pub mod types;

pub use types::{StudentProfile, StudentStats};

pub use engine::{
    recompute_stats, recompute_stats_in, update_after_attempt, update_after_attempt_in,
};
