//! Leaderboards — ranking a grade by mastered skills or per-skill progress.

pub mod engine;
pub mod types;

pub use types::{LeaderboardEntry, LeaderboardScore, ResultsProvider};

pub use engine::{rank, rank_cached};
