use crate::checker::replace::ReplaceMode;
use crate::checker::suggestions::SuggestOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".wordchk.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Word list to check against; defaults to `words.txt` in the data dir.
    pub dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub max_suggestions: usize,
    pub max_distance: usize,
    pub replace_mode: ReplaceMode,
}

/// One config file. Only the keys present in the file are `Some`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
    pub dictionary: Option<PathBuf>,
    pub ignore_patterns: Option<Vec<String>>,
    pub max_suggestions: Option<usize>,
    pub max_distance: Option<usize>,
    pub replace_mode: Option<ReplaceMode>,
}

impl Default for Config {
    fn default() -> Self {
        let suggest = SuggestOptions::default();
        Self {
            dictionary: None,
            ignore_patterns: Vec::new(),
            max_suggestions: suggest.max_suggestions,
            max_distance: suggest.max_distance,
            replace_mode: ReplaceMode::default(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(dictionary: Option<PathBuf>, cli_patterns: Vec<String>) -> Result<Self> {
        let global = Self::global_config_path();
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        Self::load_layers(global.as_deref(), Some(local.as_path()), dictionary, cli_patterns)
    }

    /// Layered load with explicit config file locations. Missing files are
    /// skipped; unparsable ones are errors.
    ///
    /// Scalar keys from a later layer replace earlier values, even when they
    /// equal the built-in default. Ignore patterns accumulate across global,
    /// local and CLI.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        dictionary: Option<PathBuf>,
        cli_patterns: Vec<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                config.apply(ConfigLayer::from_file(path)?);
            }
        }

        config.apply(ConfigLayer {
            dictionary,
            ignore_patterns: Some(cli_patterns),
            ..Default::default()
        });

        Ok(config)
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(dictionary) = layer.dictionary {
            self.dictionary = Some(dictionary);
        }
        if let Some(patterns) = layer.ignore_patterns {
            self.ignore_patterns.extend(patterns);
        }
        if let Some(max) = layer.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(max) = layer.max_distance {
            self.max_distance = max;
        }
        if let Some(mode) = layer.replace_mode {
            self.replace_mode = mode;
        }
    }

    /// The word list in use: the configured path, or the default one.
    pub fn dictionary_path(&self) -> Result<PathBuf> {
        match &self.dictionary {
            Some(path) => Ok(path.clone()),
            None => Self::default_dictionary_path().context("Failed to get data directory"),
        }
    }

    pub fn suggest_options(&self) -> SuggestOptions {
        SuggestOptions {
            max_distance: self.max_distance,
            max_suggestions: self.max_suggestions,
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wordchk").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_dictionary_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("words.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wordchk").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

impl ConfigLayer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.dictionary.is_none());
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.max_distance, 2);
        assert_eq!(config.replace_mode, ReplaceMode::Substring);
    }

    #[test]
    fn test_apply_layer() {
        let mut config = Config::default();
        config.apply(ConfigLayer {
            max_distance: Some(1),
            replace_mode: Some(ReplaceMode::WholeWord),
            ..Default::default()
        });

        assert_eq!(config.max_distance, 1);
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.replace_mode, ReplaceMode::WholeWord);
    }

    #[test]
    fn test_local_can_restore_default_values() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(
            &global,
            "max_suggestions = 10\nmax_distance = 1\nreplace_mode = \"whole-word\"\n",
        )
        .unwrap();
        fs::write(
            &local,
            "max_suggestions = 5\nmax_distance = 2\nreplace_mode = \"substring\"\n",
        )
        .unwrap();

        let config =
            Config::load_layers(Some(global.as_path()), Some(local.as_path()), None, Vec::new())
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_ignore_patterns_accumulate_across_layers() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(&global, "ignore_patterns = [\"^https?://\"]\n").unwrap();
        fs::write(&local, "ignore_patterns = [\"^TODO$\"]\n").unwrap();

        let config = Config::load_layers(
            Some(global.as_path()),
            Some(local.as_path()),
            None,
            vec!["^[A-Z]+$".to_string()],
        )
        .unwrap();
        assert_eq!(
            config.ignore_patterns,
            vec!["^https?://", "^TODO$", "^[A-Z]+$"]
        );
    }

    #[test]
    fn test_layer_precedence() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(
            &global,
            "dictionary = \"/usr/share/dict/words\"\nmax_suggestions = 10\nmax_distance = 1\n",
        )
        .unwrap();
        fs::write(&local, "max_distance = 3\nignore_patterns = [\"^TODO$\"]\n").unwrap();

        let config = Config::load_layers(
            Some(global.as_path()),
            Some(local.as_path()),
            None,
            vec!["^[A-Z]+$".to_string()],
        )
        .unwrap();

        assert_eq!(config.dictionary, Some(PathBuf::from("/usr/share/dict/words")));
        assert_eq!(config.max_suggestions, 10);
        assert_eq!(config.max_distance, 3);
        assert_eq!(config.ignore_patterns, vec!["^TODO$", "^[A-Z]+$"]);
    }

    #[test]
    fn test_cli_dictionary_wins() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("local.toml");
        fs::write(&local, "dictionary = \"from-file.txt\"\n").unwrap();

        let config = Config::load_layers(
            None,
            Some(local.as_path()),
            Some(PathBuf::from("cli.txt")),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(config.dictionary_path().unwrap(), PathBuf::from("cli.txt"));
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = Config::load_layers(Some(missing.as_path()), None, None, Vec::new()).unwrap();
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("bad.toml");
        fs::write(&local, "max_suggestions = \"many\"").unwrap();

        let err = Config::load_layers(None, Some(local.as_path()), None, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
