// codescrub/src/ui/redaction_summary.rs
//! Tabular per-category summaries for `sanitize` and `scan`.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use std::io::{self, Write};

use codescrub_core::{CompiledCatalog, RedactionSummaryItem};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Builds the summary table: one row per category with at least one redaction.
pub fn summary_table(summary: &[RedactionSummaryItem], theme: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "Description", "Occurrences"]);

    for item in summary {
        table.add_row(vec![
            Cell::new(styled(item.category.as_str(), ThemeEntry::SummaryRuleName, theme, enable_colors)),
            Cell::new(item.category.label()),
            Cell::new(styled(&item.occurrences.to_string(), ThemeEntry::SummaryOccurrences, theme, enable_colors))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Prints the redaction summary, or a one-line notice when nothing was redacted.
pub fn print_summary<W: Write + ?Sized>(
    summary: &[RedactionSummaryItem],
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(writer, "{}", styled("No redactions applied.", ThemeEntry::Info, theme, enable_colors));
    }
    writeln!(writer, "{}", styled("Redaction Summary", ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", summary_table(summary, theme, enable_colors))
}

/// Prints every category of the catalog in order with its placeholder.
pub fn print_catalog<W: Write + ?Sized>(
    catalog: &CompiledCatalog,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "Description", "Rules", "Placeholder"]);

    for compiled in &catalog.categories {
        table.add_row(vec![
            Cell::new(styled(compiled.category.as_str(), ThemeEntry::SummaryRuleName, theme, enable_colors)),
            Cell::new(compiled.category.label()),
            Cell::new(compiled.rules.len()).set_alignment(CellAlignment::Right),
            Cell::new(styled(compiled.policy.placeholder(), ThemeEntry::RedactedText, theme, enable_colors)),
        ]);
    }
    writeln!(writer, "{}", table)
}
