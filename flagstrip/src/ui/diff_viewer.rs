// flagstrip/src/ui/diff_viewer.rs
//! Unified diff rendering of original versus stripped content.
//!
//! Removed lines are shown in red, added lines in green when colour is enabled.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a unified diff between `original` and `stripped` labelled with `id`.
pub fn print_diff<W: Write>(
    id: &str,
    original: &str,
    stripped: &str,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let header = format!("--- {id}\n+++ {id} (stripped)");
    if supports_color {
        writeln!(writer, "{}", header.yellow().bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let patch = create_patch(original, stripped);
    if patch.hunks().is_empty() {
        writeln!(writer, "No changes detected.")?;
        return Ok(());
    }

    for hunk in patch.hunks() {
        let range = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_range().start(),
            hunk.old_range().len(),
            hunk.new_range().start(),
            hunk.new_range().len()
        );
        if supports_color {
            writeln!(writer, "{}", range.cyan())?;
        } else {
            writeln!(writer, "{}", range)?;
        }

        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => write_line(writer, '-', s, supports_color.then_some(true))?,
                DiffLine::Insert(s) => write_line(writer, '+', s, supports_color.then_some(false))?,
                DiffLine::Context(s) => write_line(writer, ' ', s, None)?,
            }
        }
    }
    Ok(())
}

/// `removed` is `Some(true)` for red, `Some(false)` for green, `None` for plain.
fn write_line<W: Write>(writer: &mut W, sign: char, text: &str, removed: Option<bool>) -> io::Result<()> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let line = format!("{sign}{text}");
    match removed {
        Some(true) => writeln!(writer, "{}", line.red()),
        Some(false) => writeln!(writer, "{}", line.green()),
        None => writeln!(writer, "{}", line),
    }
}
