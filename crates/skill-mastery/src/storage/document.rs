//! Versioned JSON document files shared by the stores.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "document": { ... }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{MasteryError, Result};

pub(crate) const DOCUMENT_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct DocumentFile<T> {
    version: u32,
    document: T,
}

/// Write `document` to `path`, replacing any previous content.
pub(crate) fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let file = DocumentFile {
        version: DOCUMENT_FILE_VERSION,
        document,
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| MasteryError::SerializationError(e.to_string()))?;
    write_atomic(path, json.as_bytes())
}

/// Sibling path that partial writes go to before being moved into place.
/// The `.tmp` extension keeps it out of directory scans for `.json` files.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Replace `path` with `data` so readers never see a partial file.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path);
    if let Err(e) = std::fs::write(&tmp_path, data) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(MasteryError::Io(e));
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Create `path` with `data` only if it does not exist yet.
///
/// The content is written to a temp file first and then hard-linked into
/// place, so a failed write leaves nothing at `path`. Returns `Ok(false)`
/// when `path` already exists.
pub(crate) fn create_atomic(path: &Path, data: &[u8]) -> Result<bool> {
    let tmp_path = temp_path(path);
    if let Err(e) = std::fs::write(&tmp_path, data) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(MasteryError::Io(e));
    }
    let linked = std::fs::hard_link(&tmp_path, path);
    std::fs::remove_file(&tmp_path)?;
    match linked {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(MasteryError::Io(e)),
    }
}

/// Read a document, or `None` if the file does not exist.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(MasteryError::Io(e)),
    };
    let file: DocumentFile<T> = serde_json::from_slice(&bytes).map_err(|e| {
        MasteryError::InvalidFileFormat(format!("failed to parse {}: {e}", path.display()))
    })?;
    if file.version > DOCUMENT_FILE_VERSION {
        return Err(MasteryError::InvalidFileFormat(format!(
            "{} has unsupported version {}",
            path.display(),
            file.version
        )));
    }
    Ok(Some(file.document))
}

/// Reject ids that cannot safely be used as file names.
pub(crate) fn check_file_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
        return Err(MasteryError::StorageError(format!(
            "{kind} id '{id}' cannot be used as a file name"
        )));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
