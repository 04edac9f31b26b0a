use crate::checker::tokenizer::normalize_word;
use crate::{Dictionary, SpellChecker};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

// Pinned to a commit so a download is reproducible
pub const DEFAULT_WORDLIST_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/6e4bc58ad764c3e6df8b5be4048671962c9d6a23/words_alpha.txt";

/// Add words through the checker so the running dictionary and its file
/// stay in step. Returns how many were new.
pub fn add_words(checker: &SpellChecker, words: &[String], colored: bool) -> Result<usize> {
    let mut added = 0;

    for word in words {
        let is_new = checker
            .add_word(word)
            .with_context(|| format!("Failed to add '{}' to the dictionary", word))?;

        let word = normalize_word(word).unwrap_or_default();
        match (is_new, colored) {
            (true, true) => println!("{} Added {}", "✓".green().bold(), word.cyan()),
            (true, false) => println!("✓ Added {}", word),
            (false, true) => println!("  {} is already known", word.dimmed()),
            (false, false) => println!("  {} is already known", word),
        }
        if is_new {
            added += 1;
        }
    }

    Ok(added)
}

/// Normalise a raw word list into the store format: trimmed, lowercased,
/// alphabetic, sorted, unique.
pub fn normalize_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(normalize_word)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetch a word list and install it at `dest`.
pub fn download_dictionary(url: &str, dest: &Path, force: bool) -> Result<usize> {
    if dest.exists() && !force {
        anyhow::bail!(
            "Dictionary already exists at {} (use --force to replace it)",
            dest.display()
        );
    }

    println!("{} word list...", "Downloading".cyan().bold());
    println!("Source: {}", url.dimmed());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Downloading...");

    let response = reqwest::blocking::get(url).context("Failed to download word list")?;
    if !response.status().is_success() {
        pb.finish_and_clear();
        anyhow::bail!("Failed to download word list: HTTP {}", response.status());
    }

    let content = response.text().context("Failed to read response body")?;
    pb.finish_with_message("Download complete");

    let words = normalize_word_list(&content);
    println!("Found {} words", words.len().to_string().yellow());

    install_word_list(&words, dest)?;
    log::info!("Installed {} words at {}", words.len(), dest.display());

    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        dest.display().to_string().cyan()
    );

    Ok(words.len())
}

/// Write `words` one per line, creating parent directories as needed.
pub fn install_word_list(words: &[String], dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create dictionary directory")?;
    }

    let mut content = words.join("\n");
    content.push('\n');
    fs::write(dest, content)
        .with_context(|| format!("Failed to write dictionary: {}", dest.display()))
}

pub fn show_info(path: &Path) -> Result<()> {
    if !path.exists() {
        println!(
            "{} No dictionary at {}",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        println!(
            "Run {} to fetch one, or pass {}.",
            "wordchk dict download".cyan(),
            "--dictionary <PATH>".cyan()
        );
        return Ok(());
    }

    let metadata = fs::metadata(path)?;

    println!("{}", "Dictionary".bold());
    println!("  Path: {}", path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Format: plain text, one word per line");

    match Dictionary::load(path) {
        Ok(dict) => println!("  Words: {}", dict.len()),
        Err(e) => println!("  {}: {}", "Error loading dictionary".red(), e),
    }

    Ok(())
}
