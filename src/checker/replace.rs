//! Applying accepted corrections to a text buffer.
//!
//! [`apply`] is a plain substring replacement: replacing `cat` also rewrites
//! the `cat` inside `category`. Hosts that prompt the user should check
//! [`embedded_occurrences`] first and warn, or use [`apply_whole_words`],
//! which only touches occurrences that form a complete word token.

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceMode {
    /// Every literal occurrence, including inside longer words.
    #[default]
    Substring,
    /// Only occurrences bounded by non-word characters.
    WholeWord,
}

/// Replace every case-sensitive occurrence of `misspelled` with `replacement`.
///
/// Returns the buffer unchanged when `misspelled` is empty or absent.
pub fn apply(buffer: &str, misspelled: &str, replacement: &str) -> String {
    if misspelled.is_empty() {
        return buffer.to_string();
    }
    buffer.replace(misspelled, replacement)
}

/// Like [`apply`], but skips occurrences embedded in a longer word.
pub fn apply_whole_words(buffer: &str, misspelled: &str, replacement: &str) -> String {
    if misspelled.is_empty() {
        return buffer.to_string();
    }

    let mut output = String::with_capacity(buffer.len());
    let mut last = 0;
    for (start, end) in find_occurrences(buffer, misspelled) {
        if is_whole_word(buffer, start, end) {
            output.push_str(&buffer[last..start]);
            output.push_str(replacement);
            last = end;
        }
    }
    output.push_str(&buffer[last..]);
    output
}

/// Apply several replacements in a single left-to-right pass.
///
/// Where two misspellings overlap the longest one wins. Replacement text is
/// never rescanned, so `pairs` may contain chains like `a -> b, b -> c`
/// without cascading.
pub fn apply_all(buffer: &str, pairs: &[(String, String)], mode: ReplaceMode) -> String {
    let pairs: Vec<&(String, String)> = pairs.iter().filter(|(m, _)| !m.is_empty()).collect();
    if pairs.is_empty() {
        return buffer.to_string();
    }

    let patterns: Vec<&str> = pairs.iter().map(|(m, _)| m.as_str()).collect();
    let ac = match AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&patterns)
    {
        Ok(ac) => ac,
        Err(e) => {
            // Only reachable with absurdly large pattern sets
            log::warn!("Falling back to sequential replacement: {}", e);
            return pairs.iter().fold(buffer.to_string(), |acc, (m, r)| match mode {
                ReplaceMode::Substring => apply(&acc, m, r),
                ReplaceMode::WholeWord => apply_whole_words(&acc, m, r),
            });
        }
    };

    let mut output = String::with_capacity(buffer.len());
    let mut last = 0;
    for m in ac.find_iter(buffer) {
        if mode == ReplaceMode::WholeWord && !is_whole_word(buffer, m.start(), m.end()) {
            continue;
        }
        output.push_str(&buffer[last..m.start()]);
        output.push_str(&pairs[m.pattern().as_usize()].1);
        last = m.end();
    }
    output.push_str(&buffer[last..]);
    output
}

/// Count occurrences of `word` that sit inside a longer word, i.e. the ones
/// a substring replacement would corrupt.
pub fn embedded_occurrences(buffer: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    find_occurrences(buffer, word)
        .filter(|&(start, end)| !is_whole_word(buffer, start, end))
        .count()
}

/// Count occurrences of `word` that form a complete word token.
pub fn whole_word_occurrences(buffer: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    find_occurrences(buffer, word)
        .filter(|&(start, end)| is_whole_word(buffer, start, end))
        .count()
}

fn find_occurrences<'a>(
    buffer: &'a str,
    needle: &'a str,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    buffer
        .match_indices(needle)
        .map(move |(start, _)| (start, start + needle.len()))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(buffer: &str, start: usize, end: usize) -> bool {
    let before = buffer[..start].chars().next_back();
    let after = buffer[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
