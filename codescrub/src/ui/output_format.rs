// codescrub/src/ui/output_format.rs
//! Themed status messages.
//!
//! All status output goes to a writer supplied by the caller (normally
//! stderr) so that stdout carries only sanitized text, diffs or JSON.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme color for `entry` to `text` when colors are enabled.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_prefixed<W: Write + ?Sized>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let line = format!("{}{}", prefix, msg);
    writeln!(writer, "{}", styled(&line, entry, theme, enable_colors))
}

pub fn print_info_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_success_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Success, theme, enable_colors)
}

pub fn print_warn_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", msg, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Error: ", msg, ThemeEntry::Error, theme, enable_colors)
}

/// Prints a banner line framed by `=` rules.
pub fn print_header<W: Write + ?Sized>(writer: &mut W, title: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(writer, "{}", styled(&rule, ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", styled(title, ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", styled(&rule, ThemeEntry::Header, theme, enable_colors))
}
