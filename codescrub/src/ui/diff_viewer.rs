// codescrub/src/ui/diff_viewer.rs
//! Terminal rendering of the change set.
//!
//! Two views are offered: the line-aligned report produced by
//! `codescrub_core::diff_lines`, and a conventional unified patch built with
//! `diffy` for piping into review tools.

use diffy::{create_patch, Line};
use std::io::{self, Write};

use codescrub_core::{DiffLine, DiffStatus, DiffSummary};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Prints the line-aligned diff with a gutter of `<marker><line number>`.
pub fn print_diff_lines<W: Write + ?Sized>(
    lines: &[DiffLine],
    label: &str,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let summary = DiffSummary::from_lines(lines);
    let header = format!(
        "--- {} ({} removed, {} added, {} unchanged)",
        label, summary.removed, summary.added, summary.unchanged
    );
    writeln!(writer, "{}", styled(&header, ThemeEntry::DiffHeader, theme, enable_colors))?;

    let width = lines.iter().map(|l| l.line_number).max().unwrap_or(1).to_string().len();
    for line in lines {
        let rendered = format!("{}{:>width$} | {}", line.status.marker(), line.line_number, line.text, width = width);
        let entry = match line.status {
            DiffStatus::Removed => Some(ThemeEntry::DiffRemoved),
            DiffStatus::Added => Some(ThemeEntry::DiffAdded),
            DiffStatus::Unchanged => None,
        };
        match entry {
            Some(entry) => writeln!(writer, "{}", styled(&rendered, entry, theme, enable_colors))?,
            None => writeln!(writer, "{}", rendered)?,
        }
    }
    Ok(())
}

/// Prints a unified patch between `original` and `sanitized`.
///
/// Identical inputs produce no output.
pub fn print_unified_patch<W: Write + ?Sized>(
    original: &str,
    sanitized: &str,
    label: &str,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if original == sanitized {
        return Ok(());
    }
    let original_name = format!("a/{}", label);
    let sanitized_name = format!("b/{}", label);
    let patch = create_patch(original, sanitized);

    let headers = format!("--- {}\n+++ {}", original_name, sanitized_name);
    writeln!(writer, "{}", styled(&headers, ThemeEntry::DiffHeader, theme, enable_colors))?;

    for hunk in patch.hunks() {
        let range = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_range().start(),
            hunk.old_range().len(),
            hunk.new_range().start(),
            hunk.new_range().len()
        );
        writeln!(writer, "{}", styled(&range, ThemeEntry::DiffHeader, theme, enable_colors))?;

        for line in hunk.lines() {
            let (rendered, entry) = match line {
                Line::Delete(s) => (format!("-{}", s.trim_end_matches('\n')), Some(ThemeEntry::DiffRemoved)),
                Line::Insert(s) => (format!("+{}", s.trim_end_matches('\n')), Some(ThemeEntry::DiffAdded)),
                Line::Context(s) => (format!(" {}", s.trim_end_matches('\n')), None),
            };
            match entry {
                Some(entry) => writeln!(writer, "{}", styled(&rendered, entry, theme, enable_colors))?,
                None => writeln!(writer, "{}", rendered)?,
            }
        }
    }
    Ok(())
}
