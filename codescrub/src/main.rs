// codescrub/src/main.rs
//! codescrub entry point.
//!
//! Parses the command line, initialises logging, compiles the built-in
//! catalog and dispatches to the selected subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::process::ExitCode;

use codescrub::cli::{Cli, Commands};
use codescrub::commands::{categories, error_msg, sanitize, scan};
use codescrub::logger;
use codescrub::ui::theme::{build_theme_map, ThemeStyle};
use codescrub_core::RegexEngine;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.debug, cli.quiet));
    info!("codescrub started. Version: {}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let theme = build_theme_map(cli.theme.as_deref()).context("Theme error")?;
    let engine = RegexEngine::new().context("Failed to load the built-in pattern catalog")?;

    match &cli.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(&engine, cmd, cli.quiet, &theme),
        Commands::Scan(cmd) => scan::run_scan(&engine, cmd, cli.quiet, &theme),
        Commands::Categories => {
            categories::run_categories(&engine, &theme)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
