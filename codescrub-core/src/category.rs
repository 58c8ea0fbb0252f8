// codescrub-core/src/category.rs
//! Redaction categories and the set of categories enabled for a run.
//!
//! The eight categories are fixed. Their textual identifiers (`apiKeys`,
//! `dbStrings`, ...) are what profiles, JSON reports and UI toggles use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CodescrubError;

/// A named group of redaction rules sharing one substitution policy.
///
/// Variants are declared in canonical catalog order; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    #[serde(alias = "api_keys", alias = "api-keys")]
    ApiKeys,
    Passwords,
    Emails,
    Urls,
    Ips,
    Paths,
    #[serde(alias = "db_strings", alias = "db-strings")]
    DbStrings,
    Comments,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 8] = [
        Category::ApiKeys,
        Category::Passwords,
        Category::Emails,
        Category::Urls,
        Category::Ips,
        Category::Paths,
        Category::DbStrings,
        Category::Comments,
    ];

    /// The camelCase identifier, e.g. `dbStrings`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ApiKeys => "apiKeys",
            Category::Passwords => "passwords",
            Category::Emails => "emails",
            Category::Urls => "urls",
            Category::Ips => "ips",
            Category::Paths => "paths",
            Category::DbStrings => "dbStrings",
            Category::Comments => "comments",
        }
    }

    /// Human-readable label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Category::ApiKeys => "API keys & tokens",
            Category::Passwords => "Passwords",
            Category::Emails => "Email addresses",
            Category::Urls => "URLs & domains",
            Category::Ips => "IP addresses",
            Category::Paths => "File paths",
            Category::DbStrings => "Database connection strings",
            Category::Comments => "Flagged comments",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CodescrubError;

    /// Accepts the camelCase identifier as well as snake_case and kebab-case
    /// spellings (`db_strings`, `api-keys`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().to_lowercase() == folded)
            .ok_or_else(|| CodescrubError::UnknownCategory(s.to_string()))
    }
}

/// The set of categories enabled for one sanitization run.
///
/// Iteration always yields categories in canonical order, regardless of the
/// order in which they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategorySet {
    bits: u8,
}

impl CategorySet {
    /// Every category enabled. This is the default.
    pub fn all() -> Self {
        Category::ALL.iter().copied().collect()
    }

    /// No category enabled.
    pub fn none() -> Self {
        Self { bits: 0 }
    }

    pub fn only(category: Category) -> Self {
        Self::none().with(category)
    }

    pub fn with(mut self, category: Category) -> Self {
        self.insert(category);
        self
    }

    pub fn without(mut self, category: Category) -> Self {
        self.remove(category);
        self
    }

    pub fn insert(&mut self, category: Category) {
        self.bits |= category.bit();
    }

    pub fn remove(&mut self, category: Category) {
        self.bits &= !category.bit();
    }

    pub fn contains(&self, category: Category) -> bool {
        self.bits & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.iter().copied().filter(move |c| self.contains(*c))
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::none();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Category::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
