// codescrub-core/src/engine.rs
//! Defines the core SanitizationEngine trait and the result it produces.
//!
//! The `SanitizationEngine` trait decouples callers (the CLI, headless helpers,
//! tests) from the matching strategy. Engines are pure: every call owns its
//! working copy and returns a fresh `SanitizationResult`.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;

use crate::category::{Category, CategorySet};
use crate::errors::CodescrubError;
use crate::redaction_match::{RedactionMatch, RedactionSummaryItem};
use crate::sanitizers::compiler::CompiledCatalog;

/// The outcome of one `sanitize` call. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationResult {
    pub original_text: String,
    pub redacted_text: String,
    /// Number of redactions applied during this run.
    pub redaction_count: usize,
    /// True when the input already carried enough placeholders to be left alone.
    pub already_sanitized: bool,
    /// `chars(original) - chars(redacted)`; negative when substitutions lengthened the text.
    pub char_delta: i64,
    /// Every accepted match in the order it was applied.
    pub matches: Vec<RedactionMatch>,
}

impl SanitizationResult {
    pub(crate) fn new(original: &str, redacted: String, matches: Vec<RedactionMatch>) -> Self {
        let char_delta = original.chars().count() as i64 - redacted.chars().count() as i64;
        Self {
            original_text: original.to_string(),
            redacted_text: redacted,
            redaction_count: matches.len(),
            already_sanitized: false,
            char_delta,
            matches,
        }
    }

    pub(crate) fn already_sanitized(original: &str) -> Self {
        Self {
            original_text: original.to_string(),
            redacted_text: original.to_string(),
            redaction_count: 0,
            already_sanitized: true,
            char_delta: 0,
            matches: Vec::new(),
        }
    }

    /// Absolute number of characters the text grew or shrank by.
    pub fn chars_changed(&self) -> u64 {
        self.char_delta.unsigned_abs()
    }

    /// Number of lines in the redacted text.
    pub fn lines_processed(&self) -> usize {
        self.redacted_text.split('\n').count()
    }

    pub fn is_changed(&self) -> bool {
        self.original_text != self.redacted_text
    }

    /// Redactions attributed to one category.
    pub fn count_for(&self, category: Category) -> usize {
        self.matches.iter().filter(|m| m.category == category).count()
    }

    pub fn summary(&self) -> Vec<RedactionSummaryItem> {
        crate::redaction_match::summarize_matches(&self.matches)
    }
}

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Redacts every enabled category from `content`.
    ///
    /// Returns `CodescrubError::EmptyInput` for empty or whitespace-only input.
    /// Input that already contains three or more distinct placeholders is
    /// returned unchanged with `already_sanitized` set.
    fn sanitize(&self, content: &str, enabled: &CategorySet) -> Result<SanitizationResult, CodescrubError>;

    /// Reports what `sanitize` would redact, grouped by category.
    ///
    /// Empty input and already-sanitized input produce an empty summary.
    fn analyze_for_stats(&self, content: &str, enabled: &CategorySet) -> Result<Vec<RedactionSummaryItem>, CodescrubError>;

    /// Returns a reference to the compiled catalog used by the engine.
    fn compiled_catalog(&self) -> &CompiledCatalog;
}
