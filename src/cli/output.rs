use crate::reader::DocumentFormat;
use crate::CheckResult;
use anyhow::Result;
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Suggestions keyed by misspelled word.
pub type SuggestionMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFinding {
    pub file: String,
    pub unit: usize,
    pub unit_kind: String,
    pub word: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput {
    pub files_checked: usize,
    pub total_errors: usize,
    pub findings: Vec<JsonFinding>,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self {
            files_checked: 0,
            total_errors: 0,
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, file_path: &Path, result: &CheckResult, suggestions: &SuggestionMap) {
        self.files_checked += 1;
        self.total_errors += result.findings.len();
        self.findings.extend(result.findings.iter().map(|f| JsonFinding {
            file: file_path.display().to_string(),
            unit: f.unit,
            unit_kind: result.format.unit_name().to_string(),
            word: f.word.clone(),
            suggestions: suggestions.get(&f.word).cloned().unwrap_or_default(),
        }));
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the findings of one file, already in (unit, word) order.
pub fn print_findings(
    file_path: &Path,
    result: &CheckResult,
    suggestions: &SuggestionMap,
    colored_output: bool,
) {
    if result.is_clean() {
        return;
    }

    let file_name = file_path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for finding in &result.findings {
        let location = format!("{} {}", result.format.unit_name(), finding.unit);
        let suggested = suggestions
            .get(&finding.word)
            .filter(|s| !s.is_empty())
            .map(|s| s.join(", "));

        if colored_output {
            println!("  {} at {}", finding.word.red().bold(), location.blue());
            if let Some(suggested) = suggested {
                println!("    {} {}", "→".dimmed(), suggested.green());
            }
        } else {
            println!("  {} at {}", finding.word, location);
            if let Some(suggested) = suggested {
                println!("    → {}", suggested);
            }
        }
    }
}

pub fn print_suggestions(word: &str, suggestions: &[String], colored: bool) {
    if suggestions.is_empty() {
        if colored {
            println!("{} {}", "No suggestions for".yellow(), word.bold());
        } else {
            println!("No suggestions for {}", word);
        }
        return;
    }

    for suggestion in suggestions {
        if colored {
            println!("{}", suggestion.green());
        } else {
            println!("{}", suggestion);
        }
    }
}

pub fn print_check_summary(total_errors: usize, files: usize, colored: bool) {
    println!();
    let file_word = if files == 1 { "file" } else { "files" };
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "error" } else { "errors" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files,
                file_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors, error_word, files, file_word
            );
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, remaining: usize, files: usize, colored: bool) {
    println!();
    let file_word = if files == 1 { "file" } else { "files" };
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections applied.".green().bold());
        } else {
            println!("No corrections applied.");
        }
    } else {
        let fix_word = if total_fixed == 1 { "correction" } else { "corrections" };
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files,
                file_word
            );
        } else {
            println!(
                "✓ {} {} applied to {} {}",
                total_fixed, fix_word, files, file_word
            );
        }
    }

    if remaining > 0 {
        let message = format!(
            "{} misspelling{} left unchanged (run without --fix to list them)",
            remaining,
            if remaining == 1 { "" } else { "s" }
        );
        if colored {
            println!("{} {}", "!".yellow().bold(), message.yellow());
        } else {
            println!("! {}", message);
        }
    }
}

/// Warn that a substring replacement would also rewrite longer words.
pub fn print_substring_warning(word: &str, embedded: usize, colored: bool) {
    let message = format!(
        "'{}' also appears inside {} longer word{}; those will be changed too",
        word,
        embedded,
        if embedded == 1 { "" } else { "s" }
    );
    if colored {
        println!("  {} {}", "!".yellow().bold(), message.yellow());
    } else {
        println!("  ! {}", message);
    }
}

pub fn confirm(prompt: &str, colored: bool) -> Result<bool> {
    let theme = ColorfulTheme::default();
    let confirm = if colored {
        Confirm::with_theme(&theme)
    } else {
        Confirm::new()
    };
    Ok(confirm.with_prompt(prompt).default(true).interact()?)
}

/// What the user decided for one misspelled word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Skip,
    Replace(String),
    AddToDictionary,
    Quit,
}

/// Ask how to handle `word`, found in the given units.
pub fn prompt_correction(
    word: &str,
    suggestions: &[String],
    format: DocumentFormat,
    units: &[usize],
    colored: bool,
) -> Result<Choice> {
    let locations = units
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if colored {
        println!(
            "\n{} {} ({} {})",
            "Misspelling found:".yellow().bold(),
            word.red().bold(),
            format.unit_name(),
            locations.blue()
        );
    } else {
        println!(
            "\nMisspelling found: {} ({} {})",
            word,
            format.unit_name(),
            locations
        );
    }

    let mut items = vec!["Skip".to_string()];
    items.extend(suggestions.iter().take(9).cloned());
    items.push("Custom replacement...".to_string());
    items.push("Add to dictionary".to_string());
    items.push("Quit".to_string());

    let theme = ColorfulTheme::default();
    let select = if colored {
        Select::with_theme(&theme)
    } else {
        Select::new()
    };
    let picked = select
        .with_prompt("Choice")
        .items(&items)
        .default(0)
        .interact_opt()?;

    let shown = suggestions.len().min(9);
    let choice = match picked {
        None | Some(0) => Choice::Skip,
        Some(i) if i <= shown => Choice::Replace(suggestions[i - 1].clone()),
        Some(i) if i == shown + 1 => {
            let replacement: String = Input::new()
                .with_prompt("Replacement")
                .interact_text()?;
            if replacement.is_empty() {
                Choice::Skip
            } else {
                Choice::Replace(replacement)
            }
        }
        Some(i) if i == shown + 2 => Choice::AddToDictionary,
        Some(_) => Choice::Quit,
    };

    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Finding, FindingSet};
    use std::path::PathBuf;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_json_output_collects_findings() {
        let findings: FindingSet = [
            Finding {
                unit: 2,
                word: "wrold".to_string(),
            },
            Finding {
                unit: 1,
                word: "helo".to_string(),
            },
        ]
        .into();
        let result = CheckResult {
            format: DocumentFormat::PlainText,
            findings,
        };
        let mut suggestions = SuggestionMap::new();
        suggestions.insert("helo".to_string(), vec!["hello".to_string()]);

        let mut output = JsonOutput::new();
        output.push(&PathBuf::from("doc.txt"), &result, &suggestions);

        assert_eq!(output.files_checked, 1);
        assert_eq!(output.total_errors, 2);
        assert_eq!(output.findings[0].word, "helo");
        assert_eq!(output.findings[0].suggestions, vec!["hello"]);
        assert_eq!(output.findings[1].unit_kind, "line");
        assert!(output.findings[1].suggestions.is_empty());

        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["findings"][1]["word"], "wrold");
    }
}
