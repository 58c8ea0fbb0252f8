// codescrub/src/commands/mod.rs
//! Subcommand implementations and the helpers they share.

pub mod categories;
pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::collections::BTreeMap;
use std::io;

use codescrub_core::{apply_profile, load_profile_by_name, Category, CategorySet, ProfileConfig, RedactionSummaryItem};

use crate::cli::SkipFlags;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, io::stderr().is_terminal());
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, io::stderr().is_terminal());
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, io::stderr().is_terminal());
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, io::stderr().is_terminal());
}

/// Works out the enabled categories: all of them, narrowed by the profile if
/// one is given, then by the `--skip-*` flags.
pub fn resolve_categories(profile: Option<&str>, skip: &SkipFlags) -> Result<(CategorySet, Option<ProfileConfig>)> {
    let mut enabled = CategorySet::all();
    let profile = match profile {
        Some(name) => {
            let loaded = load_profile_by_name(name).with_context(|| format!("Failed to load profile '{}'", name))?;
            enabled = apply_profile(&loaded, enabled);
            Some(loaded)
        }
        None => None,
    };
    let enabled = skip.apply(enabled);
    debug!("Enabled categories: {}", enabled);
    Ok((enabled, profile))
}

/// Per-category counts keyed by category, for JSON reports. Never carries matched text.
pub fn category_counts(summary: &[RedactionSummaryItem]) -> BTreeMap<Category, usize> {
    summary.iter().map(|item| (item.category, item.occurrences)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_flags_apply_without_profile() -> Result<()> {
        let skip = SkipFlags { urls: true, ..SkipFlags::default() };
        let (enabled, profile) = resolve_categories(None, &skip)?;
        assert!(profile.is_none());
        assert!(!enabled.contains(Category::Urls));
        assert_eq!(enabled.len(), 7);
        Ok(())
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = resolve_categories(Some("no-such-profile-e91c"), &SkipFlags::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load profile 'no-such-profile-e91c'"));
    }
}
