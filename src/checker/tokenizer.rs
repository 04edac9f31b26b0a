use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Maximal runs of word characters (Unicode letters, digits, underscore)
    static ref WORD: Regex = Regex::new(r"\b\w+\b").unwrap();
}

/// Split text into raw word tokens.
///
/// The iterator borrows `text` and is lazy; call again to restart the scan.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Reduce a raw token to its comparable form: alphabetic characters only,
/// lowercased. Digits, underscores and fused punctuation are dropped, so a
/// purely numeric token cleans to an empty string.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        // Some lowercase mappings expand into combining marks
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// Normalize a dictionary entry to the form the checker compares against.
///
/// The trimmed entry must consist of alphabetic characters only; anything
/// else (punctuation, digits, inner spaces) yields `None`. Accepted entries
/// go through [`clean`], so a word always matches itself in a document.
pub fn normalize_word(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(char::is_alphabetic) {
        return None;
    }
    Some(clean(raw)).filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_non_word_chars() {
        let tokens: Vec<_> = tokenize("Hello, world! it's 2024_v2.").collect();
        assert_eq!(tokens, vec!["Hello", "world", "it", "s", "2024_v2"]);
    }

    #[test]
    fn test_tokenize_is_restartable() {
        let text = "one two three";
        assert_eq!(tokenize(text).count(), 3);
        assert_eq!(tokenize(text).collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        let tokens: Vec<_> = tokenize("café naïve—résumé").collect();
        assert_eq!(tokens, vec!["café", "naïve", "résumé"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("  ... !!").count(), 0);
    }

    #[test]
    fn test_clean_strips_and_lowercases() {
        assert_eq!(clean("Hello"), "hello");
        assert_eq!(clean("abc123"), "abc");
        assert_eq!(clean("snake_case"), "snakecase");
        assert_eq!(clean("CAFÉ"), "café");
    }

    #[test]
    fn test_clean_numeric_is_empty() {
        assert_eq!(clean("2024"), "");
        assert_eq!(clean("___"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in ["Hello", "x1Y2z3", "İstanbul", "ÀÉÎõü", "__", "Straße", "ǅemal", "42"] {
            let once = clean(input);
            assert_eq!(clean(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_clean_output_is_lowercase_alphabetic() {
        for input in ["MiXeD_Case-99", "İstanbul", "ΣΊΣΥΦΟΣ", "tab\tbed"] {
            let cleaned = clean(input);
            assert!(cleaned.chars().all(|c| c.is_alphabetic()));
            assert!(cleaned.chars().all(|c| c.to_lowercase().eq(std::iter::once(c))));
        }
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("hello").as_deref(), Some("hello"));
        assert_eq!(normalize_word("  Hello ").as_deref(), Some("hello"));
        assert_eq!(normalize_word("don't"), None);
        assert_eq!(normalize_word("abc1"), None);
        assert_eq!(normalize_word("two words"), None);
        assert_eq!(normalize_word("   "), None);
    }

    #[test]
    fn test_normalize_word_matches_document_tokens() {
        for word in ["İstanbul", "Straße", "ΣΊΣΥΦΟΣ", "ǅemal", "Café"] {
            let entry = normalize_word(word).unwrap();
            let token = tokenize(word).next().unwrap();
            assert_eq!(entry, clean(token), "word {word:?}");
        }
    }
}
