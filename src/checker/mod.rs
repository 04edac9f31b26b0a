pub mod dictionary;
pub mod replace;
pub mod suggestions;
pub mod tokenizer;

use crate::error::Result;
use crate::reader::{self, DocumentFormat};
use crate::{CheckResult, Config, Finding, FindingSet};
use dictionary::Dictionary;
use parking_lot::RwLock;
use regex::Regex;
use std::path::Path;
use suggestions::SuggestOptions;

/// Spell-checking engine around a single owned [`Dictionary`].
///
/// Checks and suggestions share a read lock; additions take the write lock,
/// so a word is never added halfway through a check on the same instance.
pub struct SpellChecker {
    dictionary: RwLock<Dictionary>,
    ignore_patterns: Vec<Regex>,
    suggest_options: SuggestOptions,
}

impl SpellChecker {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary: RwLock::new(dictionary),
            ignore_patterns: Vec::new(),
            suggest_options: SuggestOptions::default(),
        }
    }

    /// Load the configured word list and apply the config's tuning.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let path = config.dictionary_path()?;
        let dictionary = Dictionary::load(&path)?;

        Ok(Self::new(dictionary)
            .with_ignore_patterns(&config.ignore_patterns)
            .with_suggest_options(config.suggest_options()))
    }

    /// Skip raw tokens matching any of `patterns`. Invalid patterns are
    /// logged and dropped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        for pattern in patterns {
            match Regex::new(pattern) {
                Ok(re) => self.ignore_patterns.push(re),
                Err(e) => log::warn!("Invalid ignore pattern '{}': {}", pattern, e),
            }
        }
        self
    }

    pub fn with_suggest_options(mut self, options: SuggestOptions) -> Self {
        self.suggest_options = options;
        self
    }

    /// Check numbered text units and collect the unknown words.
    ///
    /// Each unknown word is reported once per unit, however often it
    /// repeats there.
    pub fn check<I, T>(&self, units: I) -> FindingSet
    where
        I: IntoIterator<Item = (T, usize)>,
        T: AsRef<str>,
    {
        let dictionary = self.dictionary.read();
        let mut findings = FindingSet::new();

        for (text, unit) in units {
            for token in tokenizer::tokenize(text.as_ref()) {
                if self.should_ignore(token) {
                    continue;
                }

                let word = tokenizer::clean(token);
                if word.is_empty() || dictionary.contains(&word) {
                    continue;
                }

                findings.insert(Finding { unit, word });
            }
        }

        log::debug!("{} finding(s)", findings.len());
        findings
    }

    /// Read a document and check it. The document is read in full before
    /// checking starts, so a read failure never yields partial findings.
    pub fn check_path(&self, path: &Path) -> Result<CheckResult> {
        let document = reader::read_document(path)?;
        let findings = self.check(
            document
                .units
                .iter()
                .map(|unit| (unit.text.as_str(), unit.index)),
        );

        Ok(CheckResult {
            format: document.format,
            findings,
        })
    }

    /// Check in-memory content as if it came from a file of `format`.
    pub fn check_str(&self, content: &str, format: DocumentFormat) -> FindingSet {
        let units = reader::split(content, format);
        self.check(units.into_iter().map(|unit| (unit.text, unit.index)))
    }

    /// Ranked corrections for `word`.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let dictionary = self.dictionary.read();
        suggestions::generate(word, &dictionary, self.suggest_options)
    }

    /// Exact membership test against the current dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.read().contains(word)
    }

    /// Add a word to the dictionary and its backing file.
    pub fn add_word(&self, word: &str) -> Result<bool> {
        self.dictionary.write().add(word)
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.read().len()
    }

    fn should_ignore(&self, token: &str) -> bool {
        self.ignore_patterns.iter().any(|re| re.is_match(token))
    }
}
