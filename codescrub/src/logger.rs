// codescrub/src/logger.rs
//! Logger initialisation for the `codescrub` binary and its tests.
//!
//! `RUST_LOG` is honoured unless an explicit level is passed in, which is how
//! `--debug` and `--quiet` override the environment.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when neither `RUST_LOG` nor a CLI flag picks a level.
const DEFAULT_FILTER: &str = "warn";

/// Initialises `env_logger` once. Later calls are no-ops, so tests may call it freely.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(true);

    if builder.try_init().is_ok() {
        log::debug!("Logger initialised (override: {:?}).", level_override);
    }
}

/// Maps the global CLI flags onto a level override. `--debug` wins over `--quiet`.
pub fn level_from_flags(debug: bool, quiet: bool) -> Option<LevelFilter> {
    if debug {
        Some(LevelFilter::Debug)
    } else if quiet {
        Some(LevelFilter::Error)
    } else {
        None
    }
}
