// codescrub/src/commands/scan.rs
//! The `scan` command: count what `sanitize` would redact, write nothing.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use codescrub_core::{count_distinct_indicators, Category, SanitizationEngine, ALREADY_SANITIZED_THRESHOLD};

use crate::cli::ScanCommand;
use crate::commands::{category_counts, error_msg, info_msg, resolve_categories, warn_msg};
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;
use crate::utils::encoding;

/// JSON shape of a scan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub source: String,
    pub empty: bool,
    pub already_sanitized: bool,
    pub total: usize,
    pub categories: BTreeMap<Category, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<usize>,
    pub threshold_exceeded: bool,
}

/// Entry point for `codescrub scan`.
pub fn run_scan(engine: &dyn SanitizationEngine, cmd: &ScanCommand, quiet: bool, theme: &ThemeMap) -> Result<ExitCode> {
    let (enabled, _) = resolve_categories(cmd.profile.as_deref(), &cmd.skip)?;

    let (bytes, source) = match &cmd.input_file {
        Some(path) => (
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).context("Failed to read from stdin")?;
            (bytes, "stdin".to_string())
        }
    };
    let (text, _) = encoding::decode(&bytes);

    let summary = engine
        .analyze_for_stats(&text, &enabled)
        .with_context(|| format!("Failed to scan {}", source))?;
    let empty = text.trim().is_empty();
    let already_sanitized = !empty && count_distinct_indicators(&text) >= ALREADY_SANITIZED_THRESHOLD;
    let total: usize = summary.iter().map(|item| item.occurrences).sum();
    let threshold_exceeded = cmd.fail_over_threshold.is_some_and(|limit| total > limit);
    info!("Scan of {} found {} item(s).", source, total);

    if cmd.json {
        let report = ScanReport {
            source,
            empty,
            already_sanitized,
            total,
            categories: category_counts(&summary),
            threshold: cmd.fail_over_threshold,
            threshold_exceeded,
        };
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write JSON report")?;
        writeln!(writer)?;
    } else if empty {
        if !quiet {
            warn_msg("Input is empty; nothing to scan.", theme);
        }
    } else if already_sanitized {
        if !quiet {
            info_msg("Input already appears to be sanitized; nothing to report.", theme);
        }
    } else {
        let stdout = io::stdout();
        let colors = stdout.is_terminal();
        redaction_summary::print_summary(&summary, &mut stdout.lock(), theme, colors)?;
        if !quiet {
            info_msg(format!("Found {} item(s) in {}.", total, source), theme);
        }
    }

    if threshold_exceeded {
        if let Some(limit) = cmd.fail_over_threshold {
            error_msg(format!("Found {} item(s), exceeding the threshold of {}.", total, limit), theme);
        }
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
