use crate::checker::dictionary::Dictionary;
use crate::checker::tokenizer::clean;
use rayon::prelude::*;
use std::cmp::min;

/// Dictionaries at least this large are scanned on the rayon pool.
const PARALLEL_SCAN_THRESHOLD: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestOptions {
    /// Largest edit distance a candidate may have.
    pub max_distance: usize,
    /// Cap on returned suggestions; 0 returns every candidate.
    pub max_suggestions: usize,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_distance: 2,
            max_suggestions: 5,
        }
    }
}

/// Suggest dictionary words close to `word`.
///
/// Candidates are ranked by edit distance, then alphabetically, so the
/// result is reproducible for a given dictionary. An empty result is a
/// normal outcome.
pub fn generate(word: &str, dictionary: &Dictionary, options: SuggestOptions) -> Vec<String> {
    let word = clean(word);
    if word.is_empty() {
        return Vec::new();
    }

    let target: Vec<char> = word.chars().collect();
    let words = dictionary.word_set();

    let max = options.max_distance;
    let mut candidates: Vec<(usize, &str)> = if words.len() >= PARALLEL_SCAN_THRESHOLD {
        words
            .par_iter()
            .filter_map(|candidate| score(&target, candidate, max))
            .collect()
    } else {
        words
            .iter()
            .filter_map(|candidate| score(&target, candidate, max))
            .collect()
    };

    candidates.sort_unstable();
    if options.max_suggestions > 0 {
        candidates.truncate(options.max_suggestions);
    }

    log::debug!(
        "{} suggestion(s) for '{}' within distance {}",
        candidates.len(),
        word,
        options.max_distance
    );

    candidates
        .into_iter()
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

fn score<'a>(target: &[char], candidate: &'a str, max: usize) -> Option<(usize, &'a str)> {
    bounded_edit_distance(target, candidate, max).map(|distance| (distance, candidate))
}

/// Optimal string alignment distance: insertions, deletions, substitutions
/// and swaps of two adjacent characters each cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    osa(&a, &b, usize::MAX).unwrap_or(usize::MAX)
}

/// Distance between `target` and `candidate`, or `None` once it is known
/// to exceed `max`.
fn bounded_edit_distance(target: &[char], candidate: &str, max: usize) -> Option<usize> {
    // Cheap length filter before collecting chars
    let byte_len = candidate.len();
    if byte_len.saturating_add(max) < target.len() {
        return None;
    }

    let candidate: Vec<char> = candidate.chars().collect();
    if candidate.len().abs_diff(target.len()) > max {
        return None;
    }

    osa(target, &candidate, max)
}

#[allow(clippy::needless_range_loop)]
fn osa(a: &[char], b: &[char], max: usize) -> Option<usize> {
    let (len_a, len_b) = (a.len(), b.len());

    if len_a == 0 {
        return (len_b <= max).then_some(len_b);
    }
    if len_b == 0 {
        return (len_a <= max).then_some(len_a);
    }

    // Three rows: two back (for transpositions), previous, current
    let mut before_prev: Vec<usize> = vec![0; len_b + 1];
    let mut prev: Vec<usize> = (0..=len_b).collect();
    let mut curr: Vec<usize> = vec![0; len_b + 1];

    for i in 1..=len_a {
        curr[0] = i;
        let mut row_min = i;

        for j in 1..=len_b {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };

            curr[j] = min(
                min(
                    prev[j] + 1,     // deletion
                    curr[j - 1] + 1, // insertion
                ),
                prev[j - 1] + cost, // substitution
            );

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                curr[j] = min(curr[j], before_prev[j - 2] + 1); // transposition
            }

            row_min = min(row_min, curr[j]);
        }

        if row_min > max {
            return None;
        }

        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[len_b];
    (distance <= max).then_some(distance)
}
