// File: codescrub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the core engine without any UI.
//! Provides helper functions for a full, one-shot sanitization of strings.

use anyhow::Result;

use crate::category::CategorySet;
use crate::diff::{diff_lines, DiffLine};
use crate::engine::{SanitizationEngine, SanitizationResult};
use crate::engines::regex_engine::RegexEngine;
use crate::errors::CodescrubError;

/// Sanitizes `content` with the built-in catalog and returns only the text.
///
/// Empty input is returned unchanged rather than reported as an error, which is
/// what pipelines feeding arbitrary chunks usually want.
pub fn headless_sanitize_string(content: &str, enabled: &CategorySet) -> Result<String> {
    let engine = RegexEngine::new()?;
    match engine.sanitize(content, enabled) {
        Ok(result) => Ok(result.redacted_text),
        Err(CodescrubError::EmptyInput) => Ok(content.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Sanitizes `content` and builds the line diff against the original in one call.
pub fn headless_sanitize_with_diff(
    content: &str,
    enabled: &CategorySet,
) -> Result<(SanitizationResult, Vec<DiffLine>)> {
    let engine = RegexEngine::new()?;
    let result = engine.sanitize(content, enabled)?;
    let diff = diff_lines(&result.original_text, &result.redacted_text);
    Ok((result, diff))
}
