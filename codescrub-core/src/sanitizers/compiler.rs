//! compiler.rs - Manages the compilation and caching of the pattern catalog.
//!
//! This module converts a `CatalogConfig` into a `CompiledCatalog`, which holds
//! ready-to-run regular expressions grouped by category in execution order.
//! The built-in catalog is compiled at most once per process and shared
//! through an `Arc`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;
use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::category::Category;
use crate::config::{CatalogConfig, MatchRuleDefinition, SubstitutionPolicy, MAX_PATTERN_LENGTH};
use crate::errors::CodescrubError;

/// Lead-ins stripped before an `exclude_prefix` comparison.
const EXCLUDE_LEAD_INS: [&str; 3] = ["https://", "http://", "www."];

/// A single compiled match rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// Matches starting with this prefix (after a scheme lead-in) are ignored.
    pub exclude_prefix: Option<String>,
    /// Position of the rule inside its category, for diagnostics.
    pub index: usize,
}

impl CompiledRule {
    /// If the text at `start` opens with this rule's excluded prefix (after an
    /// optional scheme or `www.` lead-in), returns the offset just past it.
    ///
    /// Scanning resumes from that offset, so a URL embedded after the
    /// excluded host in the same token is still found.
    pub fn exclusion_end(&self, text: &str, start: usize) -> Option<usize> {
        let prefix = self.exclude_prefix.as_deref()?;
        let anchored = text.get(start..)?;
        let lead_in = EXCLUDE_LEAD_INS
            .iter()
            .find(|lead_in| anchored.starts_with(**lead_in))
            .map_or(0, |lead_in| lead_in.len());
        anchored[lead_in..]
            .starts_with(prefix)
            .then_some(start + lead_in + prefix.len())
    }
}

/// A compiled category: its rules in declaration order and its policy.
#[derive(Debug)]
pub struct CompiledCategory {
    pub category: Category,
    pub rules: Vec<CompiledRule>,
    pub policy: SubstitutionPolicy,
}

/// The compiled catalog, categories in execution order.
#[derive(Debug)]
pub struct CompiledCatalog {
    pub categories: Vec<CompiledCategory>,
}

impl CompiledCatalog {
    /// Category identifiers in execution order.
    pub fn categories(&self) -> Vec<Category> {
        self.categories.iter().map(|c| c.category).collect()
    }

    pub fn get(&self, category: Category) -> Option<&CompiledCategory> {
        self.categories.iter().find(|c| c.category == category)
    }
}

static DEFAULT_CATALOG: OnceCell<Arc<CompiledCatalog>> = OnceCell::new();

fn compile_rule(category: Category, index: usize, rule: &MatchRuleDefinition) -> Result<CompiledRule, CodescrubError> {
    if rule.pattern.len() > MAX_PATTERN_LENGTH {
        return Err(CodescrubError::PatternLengthExceeded(
            category.to_string(),
            rule.pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(&rule.pattern)
        .case_insensitive(rule.case_insensitive)
        .multi_line(rule.multiline)
        .crlf(rule.multiline)
        .dot_matches_new_line(rule.dot_matches_new_line)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| CodescrubError::RuleCompilationError(category.to_string(), index, e))?;

    Ok(CompiledRule {
        regex,
        exclude_prefix: rule.exclude_prefix.clone(),
        index,
    })
}

/// Compiles a `CatalogConfig` into a `CompiledCatalog`.
///
/// All compilation errors are collected and reported together.
pub fn compile_catalog(config: &CatalogConfig) -> Result<CompiledCatalog, CodescrubError> {
    debug!("Starting compilation of {} categories.", config.categories.len());

    let mut categories = Vec::with_capacity(config.categories.len());
    let mut compilation_errors = Vec::new();

    for definition in &config.categories {
        let mut rules = Vec::with_capacity(definition.rules.len());
        for (index, rule) in definition.rules.iter().enumerate() {
            match compile_rule(definition.name, index, rule) {
                Ok(compiled) => rules.push(compiled),
                Err(e) => compilation_errors.push(e),
            }
        }
        log::debug!(
            target: "codescrub_core::sanitizer",
            "Category '{}' compiled with {} rule(s).",
            definition.name,
            rules.len()
        );
        categories.push(CompiledCategory {
            category: definition.name,
            rules,
            policy: definition.policy.clone(),
        });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(CodescrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        Ok(CompiledCatalog { categories })
    }
}

/// Returns the built-in catalog, compiling it on first use.
pub fn get_or_compile_catalog() -> Result<Arc<CompiledCatalog>> {
    let catalog = DEFAULT_CATALOG.get_or_try_init(|| -> Result<Arc<CompiledCatalog>> {
        debug!("Compiled catalog not initialised yet. Compiling now.");
        let config = CatalogConfig::load_default()?;
        Ok(Arc::new(compile_catalog(&config)?))
    })?;
    Ok(Arc::clone(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_compiles_in_canonical_order() {
        let catalog = get_or_compile_catalog().unwrap();
        assert_eq!(catalog.categories(), Category::ALL.to_vec());
        assert!(catalog.categories.iter().all(|c| !c.rules.is_empty()));
    }

    #[test]
    fn cache_returns_the_same_instance() {
        let a = get_or_compile_catalog().unwrap();
        let b = get_or_compile_catalog().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn exclusion_strips_scheme_lead_in() {
        let catalog = get_or_compile_catalog().unwrap();
        let urls = catalog.get(Category::Urls).unwrap();
        let http_rule = &urls.rules[0];
        assert_eq!(http_rule.exclusion_end("https://example.com/docs", 0), Some(19));
        assert_eq!(http_rule.exclusion_end("see http://example.com", 4), Some(22));
        assert_eq!(http_rule.exclusion_end("https://internal.corp.io", 0), None);
        let bare_rule = &urls.rules[2];
        assert_eq!(bare_rule.exclusion_end("example.com", 0), Some(11));
        assert_eq!(bare_rule.exclusion_end("www.example.com", 0), Some(15));
        assert_eq!(bare_rule.exclusion_end("company.com", 0), None);
    }

    #[test]
    fn rules_without_prefix_never_exclude() {
        let catalog = get_or_compile_catalog().unwrap();
        let emails = catalog.get(Category::Emails).unwrap();
        assert_eq!(emails.rules[0].exclusion_end("example.com", 0), None);
    }

    #[test]
    fn line_comment_rules_keep_carriage_returns() {
        let catalog = get_or_compile_catalog().unwrap();
        let comments = catalog.get(Category::Comments).unwrap();
        let todo = &comments.rules[0];
        let m = todo.regex.find("x // TODO: fix\r\ny").unwrap();
        assert_eq!(m.as_str(), "// TODO: fix");
    }
}
