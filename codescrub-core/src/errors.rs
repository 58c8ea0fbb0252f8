//! errors.rs - Custom error types for the codescrub-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `codescrub-core` library.
///
/// `EmptyInput` is the only variant a well-formed caller is expected to see in
/// normal operation: it signals that there was nothing to sanitize, which is
/// distinct from a run that found zero matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CodescrubError {
    #[error("Input is empty or contains only whitespace; nothing to sanitize")]
    EmptyInput,

    #[error("Failed to compile pattern #{1} of category '{0}': {2}")]
    RuleCompilationError(String, usize, regex::Error),

    #[error("Category '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Pattern catalog is invalid: {0}")]
    CatalogInvalid(String),

    #[error("Unknown category '{0}'. Expected one of: apiKeys, passwords, emails, urls, ips, paths, dbStrings, comments")]
    UnknownCategory(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
