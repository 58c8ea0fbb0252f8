// codescrub/src/ui/mod.rs
//! Terminal presentation: theme, messages, diffs and summary tables.

pub mod diff_viewer;
pub mod output_format;
pub mod redaction_summary;
pub mod theme;
