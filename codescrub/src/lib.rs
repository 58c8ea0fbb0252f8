// codescrub/src/lib.rs
//! # codescrub CLI Application
//!
//! This crate provides the command-line front end for `codescrub-core`:
//! batch sanitization of source files, one-shot stdin filtering, scans and
//! the colored diff view.
//!
//! License: MIT OR Apache-2.0

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
