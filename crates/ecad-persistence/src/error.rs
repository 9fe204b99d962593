//! Structured errors for the document tree and wire format.
//!
//! Every variant carries the originating file path (empty for trees that
//! were never loaded from disk) plus the element/attribute/value context
//! needed to reconstruct a user-facing message, regardless of which
//! operation failed.
//!
//! Value locations are spelled `element` for element text and
//! `element/@attribute` for attribute values.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised by tree access, wire parsing, or file I/O.
#[derive(Debug, Error)]
pub enum DomError {
    /// Tag or attribute name violating the name grammar.
    #[error("invalid tag or attribute name \"{name}\"")]
    InvalidName { file: PathBuf, name: String },

    /// Text requested from an element that holds child elements.
    #[error("element \"{element}\" has child elements and cannot carry text")]
    NotTextElement { file: PathBuf, element: String },

    /// Required attribute missing.
    #[error("attribute \"{attribute}\" not found in element \"{element}\"")]
    AttributeNotFound {
        file: PathBuf,
        element: String,
        attribute: String,
    },

    /// Required child element missing.
    #[error("child \"{child}\" not found in element \"{element}\"")]
    ChildNotFound {
        file: PathBuf,
        element: String,
        child: String,
    },

    /// An intermediate segment of a child path does not exist.
    #[error("path segment \"{segment}\" not found below element \"{element}\"")]
    PathNotFound {
        file: PathBuf,
        element: String,
        segment: String,
    },

    /// Required value present but empty.
    #[error("required value in \"{location}\" is empty")]
    EmptyValue { file: PathBuf, location: String },

    /// Value present but not decodable as the requested type.
    #[error("invalid {expected} \"{value}\" in \"{location}\"")]
    InvalidFormat {
        file: PathBuf,
        location: String,
        value: String,
        expected: &'static str,
    },

    /// The byte buffer does not contain exactly one top-level element.
    #[error("expected exactly one root element")]
    NoRootElement { file: PathBuf },

    /// Root element name differs from what the caller expects.
    #[error("root element is \"{found}\", expected \"{expected}\"")]
    RootNameMismatch {
        file: PathBuf,
        found: String,
        expected: String,
    },

    /// File format version exceeds what this application understands.
    #[error("file format version {found} is newer than the supported version {supported}")]
    VersionTooNew {
        file: PathBuf,
        found: u32,
        supported: u32,
    },

    /// Not well-formed XML, or XML outside the supported subset.
    #[error("malformed file: {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to complete save operation for {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DomError {
    pub(crate) fn malformed(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Malformed {
            path: path.into(),
            source: source.into(),
        }
    }

    /// The file the error originates from (empty for in-memory trees).
    pub fn file(&self) -> &PathBuf {
        match self {
            Self::InvalidName { file, .. }
            | Self::NotTextElement { file, .. }
            | Self::AttributeNotFound { file, .. }
            | Self::ChildNotFound { file, .. }
            | Self::PathNotFound { file, .. }
            | Self::EmptyValue { file, .. }
            | Self::InvalidFormat { file, .. }
            | Self::NoRootElement { file }
            | Self::RootNameMismatch { file, .. }
            | Self::VersionTooNew { file, .. } => file,
            Self::Malformed { path, .. } | Self::Io { path, .. } => path,
            Self::AtomicWriteFailed { target_path, .. } => target_path,
        }
    }

    /// Get a user-friendly message for this error.
    ///
    /// Unlike [`std::fmt::Display`], this always mentions the file the
    /// problem was found in when one is known.
    pub fn user_message(&self) -> String {
        let file = self.file();
        if file.as_os_str().is_empty() {
            self.to_string()
        } else {
            match self {
                Self::VersionTooNew {
                    found, supported, ..
                } => format!(
                    "The file {} was created with a newer version of ECAD Studio \
                    (file format {found}, this version supports up to {supported}). \
                    Please update the application.",
                    file.display()
                ),
                Self::Io { operation, .. } => {
                    format!("Could not {} the file at {}", operation, file.display())
                }
                _ => format!("File {}: {self}", file.display()),
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, DomError>;
