//! Catalog compilation for the regex sanitization engine.
//!
//! This module turns the declarative pattern catalog from `config` into
//! compiled regular expressions, grouped by category in execution order, and
//! caches the built-in catalog for the lifetime of the process.

pub mod compiler;
