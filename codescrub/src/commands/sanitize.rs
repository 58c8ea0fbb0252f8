// codescrub/src/commands/sanitize.rs
//! The `sanitize` command.
//!
//! With no file arguments the command is a filter: stdin in, sanitized text
//! (or a diff, patch or JSON report) out. With arguments, every resolved
//! file is sanitized into a sibling file named `<prefix><name>`, written in
//! the encoding the input was read with.

use anyhow::{anyhow, bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use codescrub_core::{
    diff_lines, Category, CategorySet, CodescrubError, DiffLine, RedactionSummaryItem, SanitizationEngine,
    SanitizationResult,
};

use crate::cli::SanitizeCommand;
use crate::commands::{category_counts, error_msg, info_msg, resolve_categories, success_msg, warn_msg};
use crate::ui::theme::{ThemeEntry, ThemeMap};
use crate::ui::{diff_viewer, output_format, redaction_summary};
use crate::utils::encoding::{self, TextEncoding};
use crate::utils::files;

/// Output prefix used when neither `--prefix` nor the profile sets one.
pub const DEFAULT_PREFIX: &str = "sanitized_";

/// Resolved options for one `sanitize` run.
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    pub enabled: CategorySet,
    pub prefix: String,
    pub output_path: Option<PathBuf>,
    pub diff: bool,
    pub patch: bool,
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl SanitizeOptions {
    /// Merges command-line flags with the selected profile.
    pub fn from_command(cmd: &SanitizeCommand, quiet: bool) -> Result<Self> {
        let (enabled, profile) = resolve_categories(cmd.profile.as_deref(), &cmd.skip)?;
        let prefix = cmd
            .prefix
            .clone()
            .or_else(|| profile.and_then(|p| p.output_prefix))
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if prefix.contains(['/', '\\']) {
            bail!("Output prefix '{}' must not contain path separators", prefix);
        }

        Ok(Self {
            enabled,
            prefix,
            output_path: cmd.output.clone(),
            diff: cmd.diff,
            patch: cmd.patch,
            json: cmd.json,
            verbose: cmd.verbose,
            quiet,
        })
    }

    fn chatty(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Outcome of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Sanitized,
    NoMatches,
    AlreadySanitized,
    Empty,
    Failed,
}

impl FileStatus {
    fn of(result: &SanitizationResult) -> Self {
        if result.already_sanitized {
            FileStatus::AlreadySanitized
        } else if result.redaction_count == 0 {
            FileStatus::NoMatches
        } else {
            FileStatus::Sanitized
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FileStatus::Sanitized => "sanitized",
            FileStatus::NoMatches => "no sensitive data found",
            FileStatus::AlreadySanitized => "already sanitized, copied unchanged",
            FileStatus::Empty => "empty input, copied unchanged",
            FileStatus::Failed => "failed",
        }
    }
}

/// Per-file entry of the batch report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub input_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    pub status: FileStatus,
    pub replacements: usize,
    pub lines: usize,
    pub chars_changed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TextEncoding>,
    pub categories: BTreeMap<Category, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn failed(input: &Path, err: &anyhow::Error) -> Self {
        Self {
            input_file: input.to_path_buf(),
            output_file: None,
            status: FileStatus::Failed,
            replacements: 0,
            lines: 0,
            chars_changed: 0,
            encoding: None,
            categories: BTreeMap::new(),
            error: Some(format!("{:#}", err)),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status != FileStatus::Failed
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchTotals {
    files: usize,
    succeeded: usize,
    failed: usize,
    replacements: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchReport<'a> {
    generated_at: String,
    version: &'static str,
    enabled_categories: Vec<Category>,
    files: &'a [FileReport],
    totals: BatchTotals,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StdinReport<'a> {
    generated_at: String,
    version: &'static str,
    enabled_categories: Vec<Category>,
    empty: bool,
    already_sanitized: bool,
    redaction_count: usize,
    char_delta: i64,
    lines: usize,
    categories: BTreeMap<Category, usize>,
    redacted_text: &'a str,
    diff: Vec<DiffLine>,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Entry point for `codescrub sanitize`.
pub fn run_sanitize(
    engine: &dyn SanitizationEngine,
    cmd: &SanitizeCommand,
    quiet: bool,
    theme: &ThemeMap,
) -> Result<ExitCode> {
    let opts = SanitizeOptions::from_command(cmd, quiet)?;
    info!("Starting sanitize operation with categories {}.", opts.enabled);

    if cmd.files.is_empty() {
        run_stdin(engine, &opts, theme)
    } else {
        run_files(engine, &cmd.files, cmd.recursive, &opts, theme)
    }
}

fn run_stdin(engine: &dyn SanitizationEngine, opts: &SanitizeOptions, theme: &ThemeMap) -> Result<ExitCode> {
    debug!("Reading input from stdin...");
    let mut bytes = Vec::new();
    io::stdin().read_to_end(&mut bytes).context("Failed to read from stdin")?;
    let (input, encoding) = encoding::decode(&bytes);

    let result = match engine.sanitize(&input, &opts.enabled) {
        Ok(result) => Some(result),
        Err(CodescrubError::EmptyInput) => None,
        Err(e) => return Err(e).context("Sanitization failed"),
    };

    if opts.json {
        let report = stdin_report(&input, result.as_ref(), opts);
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write JSON report")?;
        writeln!(writer)?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(result) = result else {
        if !opts.quiet {
            warn_msg("Input is empty; nothing to sanitize.", theme);
        }
        if let Some(path) = &opts.output_path {
            fs::write(path, &bytes).with_context(|| format!("Failed to write output file: {}", path.display()))?;
        } else if !opts.diff && !opts.patch {
            io::stdout().write_all(&bytes)?;
        }
        return Ok(ExitCode::SUCCESS);
    };

    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    let mut writer = stdout.lock();

    if let Some(path) = &opts.output_path {
        if !opts.quiet {
            info_msg(format!("Writing sanitized content to file: {}", path.display()), theme);
        }
        let encoded = encoding::encode(&result.redacted_text, encoding)?;
        fs::write(path, encoded).with_context(|| format!("Failed to write output file: {}", path.display()))?;
    }

    if opts.diff {
        let lines = diff_lines(&result.original_text, &result.redacted_text);
        diff_viewer::print_diff_lines(&lines, "stdin", &mut writer, theme, colors)?;
    } else if opts.patch {
        diff_viewer::print_unified_patch(&result.original_text, &result.redacted_text, "stdin", &mut writer, theme, colors)?;
    } else if opts.output_path.is_none() {
        debug!("Writing sanitized content to stdout.");
        writer.write_all(&encoding::encode(&result.redacted_text, encoding)?)?;
    }
    writer.flush()?;

    if !opts.quiet {
        report_single(&result, opts.verbose, theme);
    }
    Ok(ExitCode::SUCCESS)
}

fn stdin_report<'a>(input: &str, result: Option<&'a SanitizationResult>, opts: &SanitizeOptions) -> StdinReport<'a> {
    let enabled_categories = opts.enabled.iter().collect();
    match result {
        Some(result) => StdinReport {
            generated_at: timestamp(),
            version: env!("CARGO_PKG_VERSION"),
            enabled_categories,
            empty: false,
            already_sanitized: result.already_sanitized,
            redaction_count: result.redaction_count,
            char_delta: result.char_delta,
            lines: result.lines_processed(),
            categories: category_counts(&result.summary()),
            redacted_text: &result.redacted_text,
            diff: diff_lines(&result.original_text, &result.redacted_text),
        },
        None => StdinReport {
            generated_at: timestamp(),
            version: env!("CARGO_PKG_VERSION"),
            enabled_categories,
            empty: true,
            already_sanitized: false,
            redaction_count: 0,
            char_delta: 0,
            lines: input.split('\n').count(),
            categories: BTreeMap::new(),
            redacted_text: "",
            diff: Vec::new(),
        },
    }
}

fn report_single(result: &SanitizationResult, verbose: bool, theme: &ThemeMap) {
    if result.already_sanitized {
        info_msg("Input already appears to be sanitized; leaving it unchanged.", theme);
        return;
    }
    if result.redaction_count == 0 {
        info_msg("No sensitive data found.", theme);
        return;
    }
    success_msg(
        format!(
            "Sanitized {} item(s) across {} line(s), {} chars changed.",
            result.redaction_count,
            result.lines_processed(),
            result.chars_changed()
        ),
        theme,
    );
    if verbose {
        let _ = redaction_summary::print_summary(&result.summary(), &mut io::stderr(), theme, io::stderr().is_terminal());
    }
}

/// Builds `<dir>/<prefix><name>` for `input`.
pub fn output_path_for(input: &Path, prefix: &str) -> Result<PathBuf> {
    let name = input
        .file_name()
        .ok_or_else(|| anyhow!("{} has no file name", input.display()))?;
    let mut file_name = OsString::from(prefix);
    file_name.push(name);
    Ok(input.with_file_name(file_name))
}

/// Sanitizes one file into its prefixed sibling.
pub fn sanitize_file(
    engine: &dyn SanitizationEngine,
    input: &Path,
    opts: &SanitizeOptions,
) -> Result<(FileReport, Option<SanitizationResult>)> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let (text, encoding) = encoding::decode(&bytes);
    debug!("Decoded {} as {}.", input.display(), encoding.label());

    let result = match engine.sanitize(&text, &opts.enabled) {
        Ok(result) => Some(result),
        Err(CodescrubError::EmptyInput) => None,
        Err(e) => return Err(e).with_context(|| format!("Failed to sanitize {}", input.display())),
    };
    let output_text = result.as_ref().map_or(text.as_str(), |r| r.redacted_text.as_str());

    let output = output_path_for(input, &opts.prefix)?;
    let encoded = encoding::encode(output_text, encoding)
        .with_context(|| format!("Failed to encode output for {}", input.display()))?;
    fs::write(&output, encoded).with_context(|| format!("Failed to write {}", output.display()))?;

    let report = match &result {
        Some(r) => FileReport {
            input_file: input.to_path_buf(),
            output_file: Some(output),
            status: FileStatus::of(r),
            replacements: r.redaction_count,
            lines: r.lines_processed(),
            chars_changed: r.chars_changed(),
            encoding: Some(encoding),
            categories: category_counts(&r.summary()),
            error: None,
        },
        None => FileReport {
            input_file: input.to_path_buf(),
            output_file: Some(output),
            status: FileStatus::Empty,
            replacements: 0,
            lines: text.split('\n').count(),
            chars_changed: 0,
            encoding: Some(encoding),
            categories: BTreeMap::new(),
            error: None,
        },
    };
    Ok((report, result))
}

fn run_files(
    engine: &dyn SanitizationEngine,
    args: &[String],
    recursive: bool,
    opts: &SanitizeOptions,
    theme: &ThemeMap,
) -> Result<ExitCode> {
    let discovery = files::discover_files(args, recursive);
    if !opts.quiet {
        for warning in &discovery.warnings {
            warn_msg(warning, theme);
        }
    }
    if discovery.files.is_empty() {
        error_msg("No files found to process.", theme);
        return Ok(ExitCode::FAILURE);
    }

    if opts.chatty() {
        info_msg(format!("Processing {} file(s)...", discovery.files.len()), theme);
    }

    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    let mut reports = Vec::with_capacity(discovery.files.len());

    for path in &discovery.files {
        if opts.chatty() {
            info_msg(format!("   Processing: {}", path.display()), theme);
        }
        match sanitize_file(engine, path, opts) {
            Ok((report, result)) => {
                if let Some(result) = result.filter(|r| r.is_changed()) {
                    let label = path.display().to_string();
                    let mut writer = stdout.lock();
                    if opts.diff {
                        let lines = diff_lines(&result.original_text, &result.redacted_text);
                        diff_viewer::print_diff_lines(&lines, &label, &mut writer, theme, colors)?;
                    } else if opts.patch {
                        diff_viewer::print_unified_patch(
                            &result.original_text,
                            &result.redacted_text,
                            &label,
                            &mut writer,
                            theme,
                            colors,
                        )?;
                    }
                }
                reports.push(report);
            }
            Err(e) => {
                if !opts.quiet {
                    error_msg(format!("{}: {:#}", path.display(), e), theme);
                }
                reports.push(FileReport::failed(path, &e));
            }
        }
    }

    let totals = BatchTotals {
        files: reports.len(),
        succeeded: reports.iter().filter(|r| r.succeeded()).count(),
        failed: reports.iter().filter(|r| !r.succeeded()).count(),
        replacements: reports.iter().map(|r| r.replacements).sum(),
    };
    let failed = totals.failed;

    if opts.json {
        let report = BatchReport {
            generated_at: timestamp(),
            version: env!("CARGO_PKG_VERSION"),
            enabled_categories: opts.enabled.iter().collect(),
            files: &reports,
            totals,
        };
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write JSON report")?;
        writeln!(writer)?;
    } else if !opts.quiet {
        print_results(&reports, opts.verbose, theme)?;
    }

    info!("Sanitize operation completed; {} of {} file(s) failed.", failed, reports.len());
    Ok(if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn print_results(reports: &[FileReport], verbose: bool, theme: &ThemeMap) -> Result<()> {
    let stderr = io::stderr();
    let colors = stderr.is_terminal();
    let mut w = stderr.lock();

    let (ok, failed): (Vec<&FileReport>, Vec<&FileReport>) = reports.iter().partition(|r| r.succeeded());
    let total_replacements: usize = ok.iter().map(|r| r.replacements).sum();

    writeln!(w)?;
    output_format::print_header(&mut w, "CODESCRUB RESULTS", theme, colors)?;

    if !ok.is_empty() {
        output_format::print_success_message(&mut w, &format!("Successfully processed: {} file(s)", ok.len()), theme, colors)?;
        output_format::print_info_message(&mut w, &format!("Total replacements made: {}", total_replacements), theme, colors)?;

        if verbose {
            writeln!(w, "\nDetailed Results:\n{}", "-".repeat(40))?;
            for r in &ok {
                writeln!(w, "{}", r.input_file.display())?;
                if let Some(out) = &r.output_file {
                    writeln!(w, "   -> {}", out.display())?;
                }
                writeln!(w, "   {} replacement(s), {}", r.replacements, r.status.describe())?;
                writeln!(w, "   {} lines, {} chars changed", r.lines, r.chars_changed)?;
            }

            let mut totals: BTreeMap<Category, usize> = BTreeMap::new();
            for r in &ok {
                for (category, count) in &r.categories {
                    *totals.entry(*category).or_default() += count;
                }
            }
            let summary: Vec<RedactionSummaryItem> = totals
                .into_iter()
                .map(|(category, occurrences)| RedactionSummaryItem {
                    category,
                    occurrences,
                    original_texts: Vec::new(),
                    sanitized_texts: Vec::new(),
                })
                .collect();
            writeln!(w)?;
            redaction_summary::print_summary(&summary, &mut w, theme, colors)?;
        }
    }

    if !failed.is_empty() {
        output_format::print_error_message(&mut w, &format!("Failed to process: {} file(s)", failed.len()), theme, colors)?;
        if verbose {
            for r in &failed {
                writeln!(w, "   {}: {}", r.input_file.display(), r.error.as_deref().unwrap_or("unknown error"))?;
            }
        }
    }

    writeln!(w, "{}", output_format::styled(&"=".repeat(60), ThemeEntry::Header, theme, colors))?;
    Ok(())
}
