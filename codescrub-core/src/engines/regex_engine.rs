//! A `SanitizationEngine` implementation that uses regular expressions
//! to identify and redact sensitive data.
//!
//! Categories run in catalog order over a single working copy, so a span
//! redacted by one category carries a placeholder by the time later
//! categories scan it, and is skipped by them.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::category::{Category, CategorySet};
use crate::config::{contains_indicator, count_distinct_indicators, SubstitutionPolicy, ALREADY_SANITIZED_THRESHOLD};
use crate::engine::{SanitizationEngine, SanitizationResult};
use crate::errors::CodescrubError;
use crate::redaction_match::{
    log_redaction_action_debug, log_skipped_match_debug, summarize_matches, RedactionMatch, RedactionSummaryItem,
};
use crate::sanitizers::compiler::{get_or_compile_catalog, CompiledCatalog, CompiledRule};

const MODULE_PATH: &str = "[codescrub_core::regex_engine]";

#[derive(Debug, Clone)]
pub struct RegexEngine {
    compiled_catalog: Arc<CompiledCatalog>,
}

impl RegexEngine {
    /// Builds an engine over the built-in catalog.
    pub fn new() -> Result<Self> {
        let compiled_catalog =
            get_or_compile_catalog().context("Failed to compile the pattern catalog for RegexEngine")?;
        Ok(Self { compiled_catalog })
    }

    /// Builds an engine over an already compiled catalog.
    pub fn with_catalog(compiled_catalog: Arc<CompiledCatalog>) -> Self {
        Self { compiled_catalog }
    }

    /// Applies one rule to `working`, returning the rewritten text.
    ///
    /// Counting and substitution share this single traversal, so the
    /// placeholder skip applies identically to both.
    fn apply_rule(
        category: Category,
        rule: &CompiledRule,
        policy: &SubstitutionPolicy,
        working: &str,
        matches: &mut Vec<RedactionMatch>,
    ) -> Option<String> {
        let mut output = String::with_capacity(working.len());
        let mut last_end = 0usize;
        let mut replaced_any = false;

        let mut search_from = 0usize;
        while search_from <= working.len() {
            let Some(m) = rule.regex.find_at(working, search_from) else {
                break;
            };
            let matched = m.as_str();
            if let Some(resume) = rule.exclusion_end(working, m.start()) {
                log_skipped_match_debug(MODULE_PATH, category, matched, "excluded prefix");
                search_from = resume;
                continue;
            }
            search_from = next_search_start(working, m.start(), m.end());
            if contains_indicator(matched) {
                log_skipped_match_debug(MODULE_PATH, category, matched, "already redacted");
                continue;
            }

            let replacement = policy.substitute(matched);
            log_redaction_action_debug(MODULE_PATH, matched, &replacement, category);

            output.push_str(&working[last_end..m.start()]);
            output.push_str(&replacement);
            last_end = m.end();
            replaced_any = true;

            matches.push(RedactionMatch {
                category,
                rule_index: rule.index,
                original_string: matched.to_string(),
                sanitized_string: replacement,
                start: m.start(),
                end: m.end(),
            });
        }

        if !replaced_any {
            return None;
        }
        output.push_str(&working[last_end..]);
        Some(output)
    }

    /// Runs every enabled category over `content`. Callers handle the empty
    /// and already-sanitized short circuits.
    fn run_passes(&self, content: &str, enabled: &CategorySet) -> (String, Vec<RedactionMatch>) {
        let mut working = content.to_string();
        let mut matches = Vec::new();

        for compiled in &self.compiled_catalog.categories {
            if !enabled.contains(compiled.category) {
                continue;
            }
            let before = matches.len();
            for rule in &compiled.rules {
                if let Some(rewritten) =
                    Self::apply_rule(compiled.category, rule, &compiled.policy, &working, &mut matches)
                {
                    working = rewritten;
                }
            }
            debug!(
                "Category '{}' applied {} redaction(s).",
                compiled.category,
                matches.len() - before
            );
        }

        (working, matches)
    }
}

/// Where to resume after a match, stepping one char past an empty match.
/// Returns `text.len() + 1` once an empty match sits at the very end.
fn next_search_start(text: &str, start: usize, end: usize) -> usize {
    if end > start {
        return end;
    }
    text[end..].chars().next().map_or(text.len() + 1, |c| end + c.len_utf8())
}

/// Shared precondition check: `Ok(true)` means the input is already sanitized.
fn check_input(content: &str) -> Result<bool, CodescrubError> {
    if content.trim().is_empty() {
        return Err(CodescrubError::EmptyInput);
    }
    let indicators = count_distinct_indicators(content);
    if indicators >= ALREADY_SANITIZED_THRESHOLD {
        info!(
            "Input contains {} distinct placeholders; treating it as already sanitized.",
            indicators
        );
        return Ok(true);
    }
    Ok(false)
}

impl SanitizationEngine for RegexEngine {
    fn sanitize(&self, content: &str, enabled: &CategorySet) -> Result<SanitizationResult, CodescrubError> {
        if check_input(content)? {
            return Ok(SanitizationResult::already_sanitized(content));
        }

        debug!("Sanitizing {} bytes with categories {}.", content.len(), enabled);
        let (redacted, matches) = self.run_passes(content, enabled);
        let result = SanitizationResult::new(content, redacted, matches);
        info!(
            "Sanitization complete: {} redaction(s), {} character(s) changed.",
            result.redaction_count,
            result.chars_changed()
        );
        Ok(result)
    }

    fn analyze_for_stats(&self, content: &str, enabled: &CategorySet) -> Result<Vec<RedactionSummaryItem>, CodescrubError> {
        match check_input(content) {
            Err(CodescrubError::EmptyInput) | Ok(true) => Ok(Vec::new()),
            Err(e) => Err(e),
            Ok(false) => {
                let (_, matches) = self.run_passes(content, enabled);
                Ok(summarize_matches(&matches))
            }
        }
    }

    fn compiled_catalog(&self) -> &CompiledCatalog {
        &self.compiled_catalog
    }
}
