// codescrub-core/src/redaction_match.rs
//! Data structures for reporting redactions, plus logging helpers that keep
//! matched secrets out of debug logs.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::category::Category;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CODESCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single accepted match: where it was found and what replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionMatch {
    pub category: Category,
    /// Index of the rule within its category.
    pub rule_index: usize,
    pub original_string: String,
    pub sanitized_string: String,
    /// Byte offsets into the working copy at the time the rule ran.
    pub start: usize,
    pub end: usize,
}

/// All redactions attributed to one category during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionSummaryItem {
    pub category: Category,
    pub occurrences: usize,
    pub original_texts: Vec<String>,
    pub sanitized_texts: Vec<String>,
}

/// Groups matches by category, in canonical order, skipping empty categories.
pub fn summarize_matches(matches: &[RedactionMatch]) -> Vec<RedactionSummaryItem> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let of_category: Vec<&RedactionMatch> = matches.iter().filter(|m| m.category == *category).collect();
            if of_category.is_empty() {
                return None;
            }
            Some(RedactionSummaryItem {
                category: *category,
                occurrences: of_category.len(),
                original_texts: of_category.iter().map(|m| m.original_string.clone()).collect(),
                sanitized_texts: of_category.iter().map(|m| m.sanitized_string.clone()).collect(),
            })
        })
        .collect()
}

/// Masks a sensitive string for display, keeping only its length.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_redaction_action_debug(
    module_path: &str,
    original_sensitive_content: &str,
    sanitized_replacement: &str,
    category: Category,
) {
    debug!(
        "{} Redaction action: Original='{}', Redacted='{}' for category '{}'",
        module_path,
        get_loggable_content(original_sensitive_content),
        sanitized_replacement,
        category
    );
}

pub fn log_skipped_match_debug(module_path: &str, category: Category, original_sensitive_content: &str, reason: &str) {
    debug!(
        "{} Skipped match for category '{}' ({}): '{}'",
        module_path,
        category,
        reason,
        get_loggable_content(original_sensitive_content)
    );
}
