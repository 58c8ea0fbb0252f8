// File: codescrub-core/src/profiles.rs

//! profiles.rs - Profile configuration, loading, and helpers for codescrub.
//!
//! A profile is a small YAML file that decides which categories run and how
//! output files are named, so a team can keep a shared "what to strip before
//! pasting" policy next to its code. The catalog itself is never changed by a
//! profile; it only toggles categories.
//!
//! license: MIT OR Apache-2.0

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{Category, CategorySet};

/// The top-level structure representing a profile.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct ProfileConfig {
    pub profile_name: String,
    pub description: Option<String>,
    /// When present, exactly these categories start enabled.
    pub enabled: Option<Vec<Category>>,
    /// Categories removed after `enabled` is applied.
    pub disabled: Vec<Category>,
    /// Prefix for sanitized output files written next to their inputs.
    pub output_prefix: Option<String>,
}

impl ProfileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.profile_name.trim().is_empty() {
            bail!("Profile validation failed: 'profile_name' cannot be empty.");
        }
        if let Some(enabled) = &self.enabled {
            if enabled.is_empty() && self.disabled.is_empty() {
                warn!("Profile '{}' enables no categories; sanitization will be a no-op.", self.profile_name);
            }
            for category in &self.disabled {
                if enabled.contains(category) {
                    warn!(
                        "Profile '{}' both enables and disables '{}'; it will be disabled.",
                        self.profile_name, category
                    );
                }
            }
        }
        if let Some(prefix) = &self.output_prefix {
            if prefix.contains(['/', '\\']) {
                bail!(
                    "Profile '{}' validation failed: 'output_prefix' must not contain path separators.",
                    self.profile_name
                );
            }
        }
        Ok(())
    }
}

pub fn profile_candidate_paths(name: &str) -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".codescrub").join("profiles")),
        dirs::config_dir().map(|p| p.join("codescrub").join("profiles")),
        Some(PathBuf::from("./config")),
    ];

    base_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads and validates a profile from a YAML file.
pub fn load_profile_from_file(path: &Path) -> Result<ProfileConfig> {
    let raw_bytes = fs::read(path).with_context(|| format!("reading profile file {}", path.display()))?;
    let cfg: ProfileConfig =
        serde_yml::from_slice(&raw_bytes).with_context(|| format!("parsing profile YAML {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loads a profile given either a file path or a bare name looked up in
/// `profile_candidate_paths`.
pub fn load_profile_by_name(name_or_path: &str) -> Result<ProfileConfig> {
    debug!("Attempting to load profile from: '{}'", name_or_path);

    let path_to_load = {
        let path = Path::new(name_or_path);
        if path.is_file() {
            debug!("Input is a valid file path. Loading directly from: {}", path.display());
            Some(path.to_path_buf())
        } else {
            profile_candidate_paths(name_or_path).into_iter().find(|p| p.exists())
        }
    }
    .context("Profile not found. It is not a valid file path, and was not found in expected locations.")?;

    let cfg = load_profile_from_file(&path_to_load)?;
    debug!("Successfully loaded profile '{}'.", cfg.profile_name);
    Ok(cfg)
}

/// Applies a profile's category toggles on top of `base`.
pub fn apply_profile(profile: &ProfileConfig, base: CategorySet) -> CategorySet {
    debug!("Applying profile '{}' to categories {}.", profile.profile_name, base);

    let mut set = match &profile.enabled {
        Some(enabled) => enabled.iter().copied().collect(),
        None => base,
    };
    for category in &profile.disabled {
        set.remove(*category);
    }

    debug!("Finished applying profile. Active categories: {}", set);
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_only_profile_keeps_the_rest() {
        let profile = ProfileConfig {
            profile_name: "no-comments".to_string(),
            disabled: vec![Category::Comments],
            ..Default::default()
        };
        let set = apply_profile(&profile, CategorySet::all());
        assert!(!set.contains(Category::Comments));
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn enabled_list_replaces_base() {
        let profile = ProfileConfig {
            profile_name: "secrets-only".to_string(),
            enabled: Some(vec![Category::ApiKeys, Category::Passwords]),
            disabled: vec![Category::Passwords],
            ..Default::default()
        };
        let set = apply_profile(&profile, CategorySet::all());
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Category::ApiKeys]);
    }

    #[test]
    fn prefix_with_separator_is_rejected() {
        let profile = ProfileConfig {
            profile_name: "bad".to_string(),
            output_prefix: Some("../out_".to_string()),
            ..Default::default()
        };
        assert!(profile.validate().is_err());
    }
}
