//! Formatting of status messages written to stderr.
//!
//! Colour is applied only when the caller reports that the target supports it.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", msg.cyan())
    } else {
        writeln!(writer, "{}", msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(writer, "warning: {}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_messages_have_no_escape_codes() {
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "careful", false).unwrap();
        print_info_message(&mut buf, "fyi", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "warning: careful\nfyi\n");
    }

    #[test]
    fn test_coloured_messages_contain_escape_codes() {
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "boom", true).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("boom"));
    }
}
