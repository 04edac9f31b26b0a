use crate::checker::replace::{
    apply_all, embedded_occurrences, whole_word_occurrences, ReplaceMode,
};
use crate::cli::output::{confirm, print_substring_warning, prompt_correction, Choice};
use crate::reader;
use crate::SpellChecker;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixOutcome {
    /// Distinct misspelled words found in the file.
    pub misspelled: usize,
    /// Words that were replaced at least once.
    pub fixed: usize,
    /// Words added to the dictionary.
    pub added: usize,
    /// Findings still present in the file afterwards.
    pub remaining: usize,
    /// The user asked to stop; remaining files should be left alone.
    pub quit: bool,
}

/// Replace every misspelled word with its top suggestion.
pub fn fix_auto(checker: &SpellChecker, path: &Path, mode: ReplaceMode) -> Result<FixOutcome> {
    let (format, content) = reader::load(path)?;
    let findings = checker.check_str(&content, format);
    let words = units_by_word(&findings);

    let mut pairs = Vec::new();
    for word in words.keys() {
        if let Some(top) = checker.suggest(word).into_iter().next() {
            pairs.push((word.to_string(), top));
        }
    }

    let (fixed, updated) = write_replacements(path, &content, &pairs, mode)?;
    Ok(FixOutcome {
        misspelled: words.len(),
        fixed,
        remaining: checker.check_str(&updated, format).len(),
        ..Default::default()
    })
}

/// Walk the misspelled words one by one and let the user decide.
pub fn fix_interactive(
    checker: &SpellChecker,
    path: &Path,
    mode: ReplaceMode,
    colored: bool,
) -> Result<FixOutcome> {
    let (format, content) = reader::load(path)?;
    let findings = checker.check_str(&content, format);
    let words = units_by_word(&findings);

    let mut outcome = FixOutcome {
        misspelled: words.len(),
        ..Default::default()
    };
    let mut pairs = Vec::new();

    for (word, units) in &words {
        let suggestions = checker.suggest(word);

        match prompt_correction(word, &suggestions, format, units, colored)? {
            Choice::Skip => {}
            Choice::Replace(replacement) => {
                if mode == ReplaceMode::Substring {
                    let embedded = embedded_occurrences(&content, word);
                    if embedded > 0 {
                        print_substring_warning(word, embedded, colored);
                        if !confirm("Replace anyway?", colored)? {
                            continue;
                        }
                    }
                }
                pairs.push((word.to_string(), replacement));
            }
            Choice::AddToDictionary => {
                checker
                    .add_word(word)
                    .with_context(|| format!("Failed to add '{}' to the dictionary", word))?;
                outcome.added += 1;
            }
            Choice::Quit => {
                outcome.quit = true;
                break;
            }
        }
    }

    let (fixed, updated) = write_replacements(path, &content, &pairs, mode)?;
    outcome.fixed = fixed;
    outcome.remaining = checker.check_str(&updated, format).len();
    Ok(outcome)
}

fn units_by_word(findings: &crate::FindingSet) -> BTreeMap<&str, Vec<usize>> {
    let mut words: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for finding in findings {
        words.entry(finding.word.as_str()).or_default().push(finding.unit);
    }
    words
}

/// Apply `pairs` and write the file back if anything changed. Returns how
/// many of the pairs actually matched, and the new content.
fn write_replacements(
    path: &Path,
    content: &str,
    pairs: &[(String, String)],
    mode: ReplaceMode,
) -> Result<(usize, String)> {
    let matched = pairs
        .iter()
        .filter(|(word, _)| match mode {
            ReplaceMode::Substring => content.contains(word.as_str()),
            ReplaceMode::WholeWord => whole_word_occurrences(content, word) > 0,
        })
        .count();

    let updated = apply_all(content, pairs, mode);
    if updated != content {
        fs::write(path, &updated)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        log::info!("Applied {} correction(s) to {}", matched, path.display());
    }

    Ok((matched, updated))
}
