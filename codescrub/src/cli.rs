// codescrub/src/cli.rs
//! This file defines the command-line interface (CLI) for the codescrub application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use codescrub_core::{Category, CategorySet};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "codescrub",
    author = "Codescrub Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove sensitive data from code before sharing it",
    long_about = "codescrub strips API keys, passwords, email addresses, URLs, IP addresses, file paths, database connection strings and flagged comments out of source code, replacing each with a recognisable placeholder so the code can be pasted into chats, issues or AI assistants.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all output except errors.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `codescrub` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes files, directories, glob patterns or stdin.
    #[command(about = "Sanitizes files, directories, glob patterns or stdin.")]
    Sanitize(SanitizeCommand),

    /// Counts what would be redacted without writing anything.
    #[command(about = "Counts what would be redacted without writing anything.")]
    Scan(ScanCommand),

    /// Lists the redaction categories and their placeholders.
    #[command(about = "Lists the redaction categories and their placeholders.")]
    Categories,
}

/// Per-category opt-out flags shared by `sanitize` and `scan`.
#[derive(Args, Debug, Clone, Default)]
pub struct SkipFlags {
    #[arg(long = "skip-api-keys", help = "Skip API keys and tokens.")]
    pub api_keys: bool,

    #[arg(long = "skip-passwords", help = "Skip passwords.")]
    pub passwords: bool,

    #[arg(long = "skip-emails", help = "Skip email addresses.")]
    pub emails: bool,

    #[arg(long = "skip-urls", help = "Skip URLs and domains.")]
    pub urls: bool,

    #[arg(long = "skip-ips", help = "Skip IP addresses.")]
    pub ips: bool,

    #[arg(long = "skip-paths", help = "Skip file paths.")]
    pub paths: bool,

    #[arg(long = "skip-db-strings", help = "Skip database connection strings.")]
    pub db_strings: bool,

    #[arg(long = "skip-comments", help = "Skip flagged comments.")]
    pub comments: bool,
}

impl SkipFlags {
    /// Categories switched off on the command line, in canonical order.
    pub fn skipped(&self) -> Vec<Category> {
        let flags = [
            (Category::ApiKeys, self.api_keys),
            (Category::Passwords, self.passwords),
            (Category::Emails, self.emails),
            (Category::Urls, self.urls),
            (Category::Ips, self.ips),
            (Category::Paths, self.paths),
            (Category::DbStrings, self.db_strings),
            (Category::Comments, self.comments),
        ];
        flags
            .into_iter()
            .filter_map(|(category, skip)| skip.then_some(category))
            .collect()
    }

    /// Removes the skipped categories from `base`.
    pub fn apply(&self, base: CategorySet) -> CategorySet {
        self.skipped()
            .into_iter()
            .fold(base, |set, category| set.without(category))
    }
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Files, directories or glob patterns. Reads stdin when empty.
    #[arg(value_name = "FILES", help = "Files, directories or glob patterns to sanitize (reads stdin if none).")]
    pub files: Vec<String>,

    /// Write sanitized stdin to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", conflicts_with = "files", help = "Write sanitized stdin to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Prefix for output file names.
    #[arg(long, short = 'p', value_name = "PREFIX", help = "Prefix for output files (default: sanitized_).")]
    pub prefix: Option<String>,

    /// Walk directories recursively.
    #[arg(long, short = 'r', help = "Process directories recursively.")]
    pub recursive: bool,

    #[command(flatten)]
    pub skip: SkipFlags,

    /// Loads a profile by name or path before applying skip flags.
    #[arg(long = "profile", value_name = "NAME", help = "Loads a redaction profile by name or path.")]
    pub profile: Option<String>,

    /// Print the line-aligned diff instead of the sanitized text.
    #[arg(long, short = 'D', help = "Show a line-by-line diff of the changes made.")]
    pub diff: bool,

    /// Print a unified patch instead of the sanitized text.
    #[arg(long, conflicts_with = "diff", help = "Show the changes as a unified patch.")]
    pub patch: bool,

    /// Print a machine-readable JSON report to stdout.
    #[arg(long, conflicts_with_all = ["diff", "patch"], help = "Print a JSON report to stdout.")]
    pub json: bool,

    /// Print per-file details.
    #[arg(long, short = 'v', help = "Show detailed output.")]
    pub verbose: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(value_name = "FILE", help = "Read input from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub skip: SkipFlags,

    /// Loads a profile by name or path before applying skip flags.
    #[arg(long = "profile", value_name = "NAME", help = "Loads a redaction profile by name or path.")]
    pub profile: Option<String>,

    /// Exit with a non-zero code if the total number of findings exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the total number of findings exceeds N.")]
    pub fail_over_threshold: Option<usize>,

    /// Print the scan summary as JSON to stdout.
    #[arg(long, help = "Print the scan summary as JSON to stdout.")]
    pub json: bool,
}
