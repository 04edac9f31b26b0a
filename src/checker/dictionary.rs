use crate::checker::tokenizer::normalize_word;
use crate::error::{Result, SpellError};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// The set of known words plus the word-list file that backs it.
pub struct Dictionary {
    words: HashSet<String>,
    path: PathBuf,
}

impl Dictionary {
    /// Load a newline-delimited word list.
    ///
    /// Entries are normalized the same way document words are cleaned.
    /// Blank lines are ignored, and so are entries containing non-alphabetic
    /// characters, since the checker never produces such words.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpellError::read(path, e))?;

        let mut words = HashSet::new();
        let mut skipped = 0usize;
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match normalize_word(line) {
                Some(word) => {
                    words.insert(word);
                }
                None => skipped += 1,
            }
        }

        log::debug!(
            "Loaded {} words from {} ({} entries skipped)",
            words.len(),
            path.display(),
            skipped
        );

        Ok(Self {
            words,
            path: path.to_path_buf(),
        })
    }

    /// Build an in-memory dictionary whose additions go to `path`.
    ///
    /// Nothing is written until [`Dictionary::add`] is called.
    pub fn from_words<I, S>(path: impl Into<PathBuf>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| normalize_word(w.as_ref()))
            .collect();

        Self {
            words,
            path: path.into(),
        }
    }

    /// Exact, case-sensitive membership test. Callers lowercase first.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Add a word, persisting it before it becomes visible in memory.
    ///
    /// The normalized form is what gets stored. Returns `Ok(false)` without
    /// touching the file when the word is already known.
    pub fn add(&mut self, word: &str) -> Result<bool> {
        let word = normalize_word(word).ok_or_else(|| SpellError::InvalidWord {
            word: word.trim().to_string(),
        })?;

        if self.words.contains(&word) {
            log::debug!("'{}' is already in the dictionary", word);
            return Ok(false);
        }

        append_line(&self.path, &word).map_err(|e| SpellError::write(&self.path, e))?;
        log::info!("Added '{}' to {}", word, self.path.display());

        self.words.insert(word);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Backing word-list file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn word_set(&self) -> &HashSet<String> {
        &self.words
    }
}

/// Append `word` as its own line and sync the file to disk.
fn append_line(path: &Path, word: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    let mut line = String::with_capacity(word.len() + 2);
    if !ends_with_newline(&mut file)? {
        line.push('\n');
    }
    line.push_str(word);
    line.push('\n');

    file.write_all(line.as_bytes())?;
    file.sync_all()
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::tokenizer::clean;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_load_normalizes_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "Hello\n  world  \n\n\nTEST\r\nhello\n").unwrap();

        let dict = Dictionary::load(&path).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(dict.contains("test"));
        assert!(!dict.contains("notfound"));
    }

    #[test]
    fn test_load_skips_non_alphabetic_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "cat\ne-mail\nr2d2\ndog\n").unwrap();

        let dict = Dictionary::load(&path).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(!dict.contains("e-mail"));
    }

    #[test]
    fn test_entries_match_their_document_form() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "İstanbul\nStraße\n").unwrap();

        let dict = Dictionary::load(&path).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains(&clean("İstanbul")));
        assert!(dict.contains("straße"));
    }

    #[test]
    fn test_add_stores_document_form() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let mut dict = Dictionary::from_words(&path, Vec::<String>::new());

        assert!(dict.add("İstanbul").unwrap());
        assert!(dict.contains("istanbul"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "istanbul\n");
        assert!(!dict.add("istanbul").unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Dictionary::load(&dir.path().join("nope.txt")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_load_invalid_utf8_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, [0x63, 0x61, 0xff, 0xfe, 0x0a]).unwrap();

        let err = Dictionary::load(&path).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ResourceUnreadable);
    }

    #[test]
    fn test_load_directory_is_unreadable() {
        let dir = tempdir().unwrap();
        let err = Dictionary::load(dir.path()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ResourceUnreadable);
    }

    #[test]
    fn test_add_persists_across_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "hello\n").unwrap();

        let mut dict = Dictionary::load(&path).unwrap();
        assert!(dict.add("NewWord").unwrap());
        assert!(dict.contains("newword"));
        assert!(!dict.contains("NewWord"));

        let reloaded = Dictionary::load(&path).unwrap();
        assert!(reloaded.contains("newword"));
        assert!(reloaded.contains("hello"));
    }

    #[test]
    fn test_add_existing_word_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "hello\n").unwrap();

        let mut dict = Dictionary::load(&path).unwrap();
        assert!(!dict.add("HELLO").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_add_after_unterminated_last_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "alpha\nbeta").unwrap();

        let mut dict = Dictionary::load(&path).unwrap();
        dict.add("gamma").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn test_add_creates_backing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("personal.txt");

        let mut dict = Dictionary::from_words(&path, ["cat"]);
        dict.add("dog").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "dog\n");
    }

    #[test]
    fn test_add_rejects_invalid_words() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let mut dict = Dictionary::from_words(&path, Vec::<String>::new());

        for bad in ["", "   ", "don't", "abc1"] {
            let err = dict.add(bad).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::InvalidWord);
        }
        assert!(dict.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_add_leaves_memory_unchanged() {
        let dir = tempdir().unwrap();
        // The parent directory does not exist, so the append must fail
        let path = dir.path().join("missing").join("words.txt");
        let mut dict = Dictionary::from_words(&path, ["cat"]);

        let err = dict.add("dog").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ResourceUnwritable);
        assert!(!dict.contains("dog"));
        assert_eq!(dict.len(), 1);
    }
}
