// codescrub-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.
//!
//! Each engine lives in its own file within this directory and is declared
//! here with `pub mod <engine_name>;`.

pub mod regex_engine;
