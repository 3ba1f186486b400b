//! Attempt log persistence — append-only `AttemptRecord` storage.
//!
//! Each record is stored as a single JSON file named `{attempt_id}.json`
//! inside the configured base directory.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "record": { ... AttemptRecord ... }
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::attempt::{AttemptId, AttemptRecord, SkillId, StudentId};
use crate::error::{MasteryError, Result};

use super::document::{check_file_id, create_atomic};

// ── File format constants ─────────────────────────────────────────────────────

const RECORD_FILE_VERSION: u32 = 1;

// ── ResultStore trait ─────────────────────────────────────────────────────────

/// Append-only attempt log.
///
/// Records are never modified. The only removal is the explicit reset of
/// every record for a (student, skill) pair.
pub trait ResultStore {
    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::DuplicateAttempt` if a record with the same
    /// id is already stored.
    fn append(&mut self, record: &AttemptRecord) -> Result<()>;

    /// Records matching the optional filters, sorted by `(timestamp, id)`.
    fn query(
        &self,
        student: Option<&StudentId>,
        skill: Option<&SkillId>,
    ) -> Result<Vec<AttemptRecord>>;

    /// Delete every record for the pair and return how many were removed.
    fn delete_for(&mut self, student: &StudentId, skill: &SkillId) -> Result<usize>;

    /// The full log.
    fn all(&self) -> Result<Vec<AttemptRecord>> {
        self.query(None, None)
    }
}

fn record_matches(record: &AttemptRecord, student: Option<&StudentId>, skill: Option<&SkillId>) -> bool {
    student.map_or(true, |s| &record.student_id == s) && skill.map_or(true, |k| &record.skill_id == k)
}

fn sort_log(records: &mut [AttemptRecord]) {
    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
}

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Wrapper written to disk for each record.
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    /// Format version number.
    version: u32,
    /// The stored record.
    record: AttemptRecord,
}

// ── FileResultStore ───────────────────────────────────────────────────────────

/// Filesystem-backed attempt log.
///
/// The store is safe for single-process use; concurrent writes from
/// multiple processes are not coordinated.
pub struct FileResultStore {
    base_dir: PathBuf,
}

impl FileResultStore {
    /// Create a new `FileResultStore` rooted at `base_dir`.
    ///
    /// The directory and any missing parents are created if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Load a single record by id.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::NotFound` if no file exists for `id`, or
    /// `MasteryError::InvalidFileFormat` if the file cannot be parsed.
    pub fn load(&self, id: &AttemptId) -> Result<AttemptRecord> {
        check_file_id("attempt", &id.0)?;
        let path = self.record_path(id);
        if !path.exists() {
            return Err(MasteryError::NotFound(format!("attempt not found: {id}")));
        }
        self.read_file(&path)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn record_path(&self, id: &AttemptId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id.0))
    }

    fn read_file(&self, path: &std::path::Path) -> Result<AttemptRecord> {
        let bytes = std::fs::read(path)?;
        let file: RecordFile = serde_json::from_slice(&bytes).map_err(|e| {
            MasteryError::InvalidFileFormat(format!(
                "failed to parse attempt file {}: {e}",
                path.display()
            ))
        })?;
        Ok(file.record)
    }

    /// Every parseable record with its path. Unreadable files are skipped
    /// with a warning so one bad record cannot hide the rest of the log.
    fn scan(&self) -> Result<Vec<(PathBuf, AttemptRecord)>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_file(&path) {
                Ok(record) => out.push((path, record)),
                Err(e) => log::warn!("skipping attempt file: {e}"),
            }
        }
        Ok(out)
    }
}

impl ResultStore for FileResultStore {
    fn append(&mut self, record: &AttemptRecord) -> Result<()> {
        check_file_id("attempt", &record.id.0)?;
        let file = RecordFile {
            version: RECORD_FILE_VERSION,
            record: record.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| MasteryError::SerializationError(e.to_string()))?;

        let path = self.record_path(&record.id);
        if path.exists() || !create_atomic(&path, json.as_bytes())? {
            return Err(MasteryError::DuplicateAttempt(record.id.0.clone()));
        }
        Ok(())
    }

    fn query(
        &self,
        student: Option<&StudentId>,
        skill: Option<&SkillId>,
    ) -> Result<Vec<AttemptRecord>> {
        let mut records: Vec<AttemptRecord> = self
            .scan()?
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| record_matches(r, student, skill))
            .collect();
        sort_log(&mut records);
        Ok(records)
    }

    fn delete_for(&mut self, student: &StudentId, skill: &SkillId) -> Result<usize> {
        let mut removed = 0;
        for (path, record) in self.scan()? {
            if record_matches(&record, Some(student), Some(skill)) {
                match std::fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(MasteryError::Io(e)),
                }
            }
        }
        log::debug!("reset {removed} attempts for {student} on {skill}");
        Ok(removed)
    }
}

// ── MemoryResultStore ─────────────────────────────────────────────────────────

/// In-memory attempt log with the same semantics as `FileResultStore`.
#[derive(Debug, Default, Clone)]
pub struct MemoryResultStore {
    records: Vec<AttemptRecord>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResultStore for MemoryResultStore {
    fn append(&mut self, record: &AttemptRecord) -> Result<()> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(MasteryError::DuplicateAttempt(record.id.0.clone()));
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn query(
        &self,
        student: Option<&StudentId>,
        skill: Option<&SkillId>,
    ) -> Result<Vec<AttemptRecord>> {
        let mut records: Vec<AttemptRecord> = self
            .records
            .iter()
            .filter(|r| record_matches(r, student, skill))
            .cloned()
            .collect();
        sort_log(&mut records);
        Ok(records)
    }

    fn delete_for(&mut self, student: &StudentId, skill: &SkillId) -> Result<usize> {
        let before = self.records.len();
        self.records
            .retain(|r| !record_matches(r, Some(student), Some(skill)));
        Ok(before - self.records.len())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
