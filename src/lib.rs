pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod reader;

pub use checker::dictionary::Dictionary;
pub use checker::SpellChecker;
pub use config::Config;
pub use error::{ErrorKind, Result, SpellError};

use reader::DocumentFormat;
use serde::Serialize;
use std::collections::BTreeSet;

/// One misspelled word and the line or paragraph it was found in.
///
/// Ordering is by unit first, then word, which is the order findings are
/// shown in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Finding {
    pub unit: usize,
    pub word: String,
}

pub type FindingSet = BTreeSet<Finding>;

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub format: DocumentFormat,
    pub findings: FindingSet,
}

impl CheckResult {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Distinct misspelled words, alphabetically.
    pub fn words(&self) -> BTreeSet<&str> {
        self.findings.iter().map(|f| f.word.as_str()).collect()
    }
}
