//! File-level load/save with the format version gate.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::document::Document;
use crate::error::{DomError, Result};

/// Current major file format version written by this application.
///
/// Files reporting a newer version are refused before any domain code
/// sees them, so a partially understood design can never be loaded and
/// silently re-saved with data loss.
pub const FILE_FORMAT_VERSION: u32 = 1;

/// Load a design file from disk and enforce the version gate.
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|e| DomError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    let document = Document::from_bytes(&bytes, path)?;
    verify_file_version(&document, FILE_FORMAT_VERSION)?;
    tracing::info!("Loaded document from {}", path.display());
    Ok(document)
}

/// Check that a document can be read by an application understanding
/// file format versions up to `supported`. Returns the file's version.
pub fn verify_file_version(document: &Document, supported: u32) -> Result<u32> {
    let found = document.file_version()?;
    if found > supported {
        return Err(DomError::VersionTooNew {
            file: document.file_path().to_path_buf(),
            found,
            supported,
        });
    }
    Ok(found)
}

/// Save a document to disk.
///
/// Uses atomic write (temp file + rename) to prevent data corruption on
/// crash or power loss.
pub fn save_document(document: &Document, path: &Path) -> Result<()> {
    let bytes = document.to_bytes()?;

    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DomError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| DomError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| DomError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| DomError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| DomError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Saved document to {}", path.display());
    Ok(())
}
