//! Document readers: turn a file into numbered text units for the checker.

pub mod markdown;
pub mod plaintext;

use crate::error::{Result, SpellError};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// One unit per line.
    PlainText,
    /// One unit per paragraph, heading, or list item.
    Markdown,
}

impl DocumentFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Some(DocumentFormat::PlainText),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            _ => None,
        }
    }

    /// What a unit index counts in this format.
    pub fn unit_name(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "line",
            DocumentFormat::Markdown => "paragraph",
        }
    }
}

/// A piece of document text and its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUnit {
    pub text: String,
    pub index: usize,
}

impl DocumentUnit {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub format: DocumentFormat,
    pub units: Vec<DocumentUnit>,
}

/// Read and split a whole document.
///
/// The format is decided before the file is touched, so an unsupported
/// extension is reported even when the path does not exist.
pub fn read_document(path: &Path) -> Result<Document> {
    let (format, content) = load(path)?;
    let units = split(&content, format);

    log::debug!(
        "Read {} {}(s) from {}",
        units.len(),
        format.unit_name(),
        path.display()
    );

    Ok(Document { format, units })
}

/// Detect the format and read the raw content of a document.
pub fn load(path: &Path) -> Result<(DocumentFormat, String)> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| SpellError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path).map_err(|e| SpellError::read(path, e))?;
    Ok((format, content))
}

/// Split already-loaded content.
pub fn split(content: &str, format: DocumentFormat) -> Vec<DocumentUnit> {
    match format {
        DocumentFormat::PlainText => plaintext::parse(content),
        DocumentFormat::Markdown => markdown::parse(content),
    }
}
