//! Storage layer for the attempt log, configuration and student records.
//!
//! The evaluators never touch storage; callers load snapshots from here,
//! evaluate, and write any derived cache back.
//!
//! # Directory layout
//!
//! By convention the default root is `~/.mastery/`:
//!
//! ```text
//! ~/.mastery/
//! ├── attempts/
//! │   └── {attempt_id}.json
//! ├── config/
//! │   ├── system_config.json
//! │   ├── rank_ladder.json
//! │   ├── skills.json
//! │   └── reward_rules.json
//! └── students/
//!     ├── students.json
//!     └── stats/
//!         └── {student_id}.json
//! ```
//!
//! # Modules
//!
//! - [`result_store`] — the `ResultStore` trait with file and in-memory logs.
//! - [`config_store`] — system config, rank ladder, skills and reward rules.
//! - [`profile_store`] — student roster and cached `StudentStats`.

mod document;
pub mod config_store;
pub mod profile_store;
pub mod result_store;

pub use config_store::ConfigStore;
pub use profile_store::ProfileStore;
pub use result_store::{FileResultStore, MemoryResultStore, ResultStore};
