//! Error types for the spell-checking engine.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by dictionary, reader, and checker operations.
///
/// None of these are recovered from inside the engine: the operation that
/// raised one is aborted and no partial result is produced.
#[derive(Error, Debug)]
pub enum SpellError {
    #[error("Resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ResourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    ResourceUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported document format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Not a dictionary word: {word:?}")]
    InvalidWord { word: String },
}

/// Fieldless discriminant of [`SpellError`], for callers that only branch
/// on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ResourceNotFound,
    ResourceUnreadable,
    ResourceUnwritable,
    UnsupportedFormat,
    InvalidWord,
}

impl SpellError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpellError::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            SpellError::ResourceUnreadable { .. } => ErrorKind::ResourceUnreadable,
            SpellError::ResourceUnwritable { .. } => ErrorKind::ResourceUnwritable,
            SpellError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            SpellError::InvalidWord { .. } => ErrorKind::InvalidWord,
        }
    }

    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SpellError::ResourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SpellError::ResourceUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        SpellError::ResourceUnwritable {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified() {
        let err = SpellError::read(
            Path::new("/missing/words.txt"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.to_string(), "Resource not found: /missing/words.txt");
    }

    #[test]
    fn test_other_io_errors_are_unreadable() {
        let err = SpellError::read(
            Path::new("words.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::ResourceUnreadable);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_invalid_word_display() {
        let err = SpellError::InvalidWord {
            word: "don't".to_string(),
        };
        assert_eq!(err.to_string(), "Not a dictionary word: \"don't\"");
    }
}
