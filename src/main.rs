use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use env_logger::Builder;
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;
use wordchk::checker::replace::ReplaceMode;
use wordchk::cli::output::{self, JsonOutput, OutputFormat, SuggestionMap};
use wordchk::{cli, dict, Config, SpellChecker};

#[derive(Parser, Debug)]
#[command(name = "wordchk")]
#[command(version, about = "Check documents against your own word list", long_about = None)]
struct Cli {
    /// Files or directories to check (.txt, .md)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Fix misspellings in place (auto-apply top suggestion)
    #[arg(short, long)]
    fix: bool,

    /// Interactive mode for selecting corrections
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Do not compute suggestions for findings
    #[arg(long)]
    no_suggestions: bool,

    /// Add words to the dictionary before checking
    #[arg(long, value_name = "WORD")]
    add_to_dict: Vec<String>,

    /// Pattern to ignore (regex, matched against raw tokens)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Word list to check against
    #[arg(short, long, global = true, env = "WORDCHK_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Maximum number of suggestions per word (0 = unlimited)
    #[arg(long, global = true)]
    max_suggestions: Option<usize>,

    /// Maximum edit distance for suggestions
    #[arg(long, global = true)]
    max_distance: Option<usize>,

    /// Only replace whole words when fixing
    #[arg(long)]
    whole_word: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Suggest corrections for a word
    Suggest {
        /// The (misspelled) word
        word: String,
    },
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// Add words to the dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show dictionary info
    Info,
    /// Download a word list into the dictionary location
    Download {
        /// Word list URL (one word per line)
        #[arg(long, default_value = dict::manager::DEFAULT_WORDLIST_URL)]
        url: String,
        /// Replace an existing dictionary
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "wordchk", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }

    let mut config = Config::load(cli.dictionary.clone(), cli.ignore_pattern.clone())?;
    if let Some(max) = cli.max_suggestions {
        config.max_suggestions = max;
    }
    if let Some(max) = cli.max_distance {
        config.max_distance = max;
    }
    if cli.whole_word {
        config.replace_mode = ReplaceMode::WholeWord;
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config, colored);
    }

    if cli.files.is_empty() && cli.add_to_dict.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let checker = SpellChecker::from_config(&config)?;

    if !cli.add_to_dict.is_empty() {
        dict::manager::add_words(&checker, &cli.add_to_dict, colored)?;
        if cli.files.is_empty() {
            return Ok(());
        }
    }

    let files = cli::collect_files(&cli.files);
    let code = if cli.fix {
        run_fix(&checker, &files, &config, cli.interactive, colored)
    } else {
        run_check(&checker, &files, cli.format, !cli.no_suggestions, colored)?
    };

    let code = if code == EXIT_MISSPELLED && cli.no_fail {
        0
    } else {
        code
    };
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

const EXIT_FAILURE: i32 = 1;
const EXIT_MISSPELLED: i32 = 2;

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    Builder::new()
        .filter_level(level)
        .parse_env("WORDCHK_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn run_check(
    checker: &SpellChecker,
    files: &[PathBuf],
    format: OutputFormat,
    with_suggestions: bool,
    colored: bool,
) -> Result<i32> {
    let mut total_errors = 0;
    let mut failed = false;
    let mut json = JsonOutput::new();

    for file_path in files {
        let result = match checker.check_path(file_path) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
                continue;
            }
        };

        let mut suggestions = SuggestionMap::new();
        if with_suggestions {
            for word in result.words() {
                suggestions.insert(word.to_string(), checker.suggest(word));
            }
        }

        total_errors += result.findings.len();
        match format {
            OutputFormat::Text => output::print_findings(file_path, &result, &suggestions, colored),
            OutputFormat::Json => json.push(file_path, &result, &suggestions),
        }
    }

    match format {
        OutputFormat::Text => output::print_check_summary(total_errors, files.len(), colored),
        OutputFormat::Json => println!("{}", json.to_json()?),
    }

    Ok(if failed {
        EXIT_FAILURE
    } else if total_errors > 0 {
        EXIT_MISSPELLED
    } else {
        0
    })
}

fn run_fix(
    checker: &SpellChecker,
    files: &[PathBuf],
    config: &Config,
    interactive: bool,
    colored: bool,
) -> i32 {
    let mut total_fixed = 0;
    let mut remaining = 0;
    let mut failed = false;

    for file_path in files {
        let outcome = if interactive {
            cli::fix::fix_interactive(checker, file_path, config.replace_mode, colored)
        } else {
            cli::fix::fix_auto(checker, file_path, config.replace_mode)
        };

        match outcome {
            Ok(outcome) => {
                total_fixed += outcome.fixed;
                remaining += outcome.remaining;
                if outcome.quit {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Error: {} ({:#})", file_path.display(), e);
                failed = true;
            }
        }
    }

    output::print_fix_summary(total_fixed, remaining, files.len(), colored);

    if failed {
        EXIT_FAILURE
    } else {
        0
    }
}

fn handle_command(command: Commands, config: &Config, colored: bool) -> Result<()> {
    match command {
        Commands::Suggest { word } => {
            let checker = SpellChecker::from_config(config)?;
            output::print_suggestions(&word, &checker.suggest(&word), colored);
        }
        Commands::Dict { action } => match action {
            DictCommands::Add { words } => {
                let checker = SpellChecker::from_config(config)?;
                dict::manager::add_words(&checker, &words, colored)?;
            }
            DictCommands::Info => {
                dict::manager::show_info(&config.dictionary_path()?)?;
            }
            DictCommands::Download { url, force } => {
                dict::manager::download_dictionary(&url, &config.dictionary_path()?, force)?;
            }
        },
    }
    Ok(())
}
