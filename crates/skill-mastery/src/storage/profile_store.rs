//! Student persistence — roster and cached stats.
//!
//! The roster is one `students.json` document. Cached stats live in
//! `stats/{student_id}.json` and are updated read-modify-write; two
//! concurrent writers race and the last one wins, which a recompute from
//! the attempt log can always repair.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::attempt::StudentId;
use crate::error::{MasteryError, Result};
use crate::stats::{StudentProfile, StudentStats};

use super::document::{check_file_id, read_document, write_document};

const STUDENTS_FILE: &str = "students.json";
const STATS_DIR: &str = "stats";

/// Filesystem-backed store for student profiles and their cached stats.
pub struct ProfileStore {
    base_dir: PathBuf,
}

impl ProfileStore {
    /// Create a new `ProfileStore` rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(base_dir.join(STATS_DIR))?;
        Ok(Self { base_dir })
    }

    fn stats_path(&self, id: &StudentId) -> PathBuf {
        self.base_dir.join(STATS_DIR).join(format!("{}.json", id.0))
    }

    // ── Roster ────────────────────────────────────────────────────────────────

    pub fn list_students(&self) -> Result<Vec<StudentProfile>> {
        Ok(read_document(&self.base_dir.join(STUDENTS_FILE))?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `MasteryError::NotFound` if the student is not on the roster.
    pub fn get_student(&self, id: &StudentId) -> Result<StudentProfile> {
        self.list_students()?
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| MasteryError::NotFound(format!("student not found: {id}")))
    }

    /// Insert or replace a student by id.
    pub fn upsert_student(&self, student: StudentProfile) -> Result<()> {
        check_file_id("student", &student.id.0)?;
        let mut students = self.list_students()?;
        match students.iter_mut().find(|s| s.id == student.id) {
            Some(existing) => *existing = student,
            None => students.push(student),
        }
        write_document(&self.base_dir.join(STUDENTS_FILE), &students)
    }

    // ── Cached stats ──────────────────────────────────────────────────────────

    /// Cached stats for a student, if any were saved.
    pub fn load_stats(&self, id: &StudentId) -> Result<Option<StudentStats>> {
        check_file_id("student", &id.0)?;
        read_document(&self.stats_path(id))
    }

    pub fn save_stats(&self, stats: &StudentStats) -> Result<()> {
        check_file_id("student", &stats.student_id.0)?;
        write_document(&self.stats_path(&stats.student_id), stats)
    }

    /// Read-modify-write of one student's cached stats.
    pub fn update_stats<F>(&self, id: &StudentId, update: F) -> Result<StudentStats>
    where
        F: FnOnce(&mut StudentStats),
    {
        let mut stats = self
            .load_stats(id)?
            .unwrap_or_else(|| StudentStats::new(id.clone()));
        update(&mut stats);
        self.save_stats(&stats)?;
        Ok(stats)
    }

    /// Cached stats for a set of students. Unreadable entries are left out
    /// with a warning.
    pub fn stats_for(&self, students: &[StudentProfile]) -> HashMap<StudentId, StudentStats> {
        let mut out = HashMap::new();
        for student in students {
            match self.load_stats(&student.id) {
                Ok(Some(stats)) => {
                    out.insert(student.id.clone(), stats);
                }
                Ok(None) => {}
                Err(e) => log::warn!("stats for {} unavailable: {e}", student.id),
            }
        }
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
