// codescrub-core/src/diff.rs
//! Line-aligned diff between an original document and its redacted form.
//!
//! Redaction never adds or removes newlines except inside block comments, so
//! the report compares lines index by index instead of computing an edit
//! script. Every call recomputes the full sequence.

use serde::Serialize;

/// Status of one line in the diff report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffStatus {
    Unchanged,
    Removed,
    Added,
}

impl DiffStatus {
    /// Single-character gutter marker, as in unified diffs.
    pub fn marker(self) -> char {
        match self {
            DiffStatus::Unchanged => ' ',
            DiffStatus::Removed => '-',
            DiffStatus::Added => '+',
        }
    }
}

/// One record of the diff report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    /// 1-based index of the line; a removed/added pair shares the same number.
    pub line_number: usize,
    pub status: DiffStatus,
    /// The raw line.
    pub text: String,
    /// The line escaped for embedding as literal HTML content.
    pub display_text: String,
}

impl DiffLine {
    fn new(line_number: usize, status: DiffStatus, text: &str) -> Self {
        Self {
            line_number,
            status,
            text: text.to_string(),
            display_text: escape_html(text),
        }
    }
}

/// Counts of each status in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub unchanged: usize,
    pub removed: usize,
    pub added: usize,
}

impl DiffSummary {
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut acc, line| {
            match line.status {
                DiffStatus::Unchanged => acc.unchanged += 1,
                DiffStatus::Removed => acc.removed += 1,
                DiffStatus::Added => acc.added += 1,
            }
            acc
        })
    }

    pub fn has_changes(&self) -> bool {
        self.removed > 0 || self.added > 0
    }
}

/// Builds the line-aligned diff of `original` against `redacted`.
///
/// Both texts are split on `\n` only. For each index up to the longer of the
/// two, equal lines yield one `Unchanged` record; otherwise the original line
/// (if any) yields `Removed`, followed by the redacted line (if any) as `Added`.
pub fn diff_lines(original: &str, redacted: &str) -> Vec<DiffLine> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let redacted_lines: Vec<&str> = redacted.split('\n').collect();
    let max_lines = original_lines.len().max(redacted_lines.len());
    let mut out = Vec::with_capacity(max_lines);

    for idx in 0..max_lines {
        let line_number = idx + 1;
        let before = original_lines.get(idx);
        let after = redacted_lines.get(idx);

        match (before, after) {
            (Some(b), Some(a)) if b == a => out.push(DiffLine::new(line_number, DiffStatus::Unchanged, b)),
            _ => {
                if let Some(b) = before {
                    out.push(DiffLine::new(line_number, DiffStatus::Removed, b));
                }
                if let Some(a) = after {
                    out.push(DiffLine::new(line_number, DiffStatus::Added, a));
                }
            }
        }
    }

    out
}

/// Escapes text for safe embedding as literal HTML content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
