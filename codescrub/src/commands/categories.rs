// codescrub/src/commands/categories.rs
//! The `categories` command.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;

use codescrub_core::SanitizationEngine;

use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

/// Lists the catalog's categories in the order they are applied.
pub fn run_categories(engine: &dyn SanitizationEngine, theme: &ThemeMap) -> Result<()> {
    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    redaction_summary::print_catalog(engine.compiled_catalog(), &mut stdout.lock(), theme, colors)?;
    Ok(())
}
