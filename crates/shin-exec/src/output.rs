// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::OnceLock;

use regex::Regex;

fn sgr_sequence() -> &'static Regex {
    static SGR: OnceLock<Regex> = OnceLock::new();
    SGR.get_or_init(|| Regex::new(r"\x1B\[[0-9;:]*m").expect("SGR pattern is valid"))
}

/// Turn captured command output into text suitable for inserting at the
/// cursor of the surrounding application.
///
/// - SGR sequences (colours, bold, …) are removed; many programs emit them
///   even when stdout is not a TTY.
/// - Leading and trailing newlines are trimmed so single-line output flows
///   into the surrounding text.
/// - Multi-line output is wrapped in newlines so it forms its own block and
///   tabular alignment survives wherever it is inserted.
pub fn format_output(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = sgr_sequence().replace_all(&text, "");
    let text = text.trim_matches('\n');

    if text.contains('\n') {
        format!("\n{text}\n")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_is_trimmed() {
        assert_eq!(format_output(b"42\n"), "42");
        assert_eq!(format_output(b"\n\nhello\n\n"), "hello");
    }

    #[test]
    fn multi_line_becomes_a_block() {
        assert_eq!(format_output(b"a  1\nbb 2\n"), "\na  1\nbb 2\n");
    }

    #[test]
    fn colour_sequences_are_removed() {
        assert_eq!(format_output(b"\x1b[1;31merror\x1b[0m: boom\n"), "error: boom");
        assert_eq!(format_output(b"\x1b[38:5:196mred\x1b[m"), "red");
    }

    #[test]
    fn other_escape_sequences_are_kept() {
        assert_eq!(format_output(b"\x1b[2Kline"), "\x1b[2Kline");
    }

    #[test]
    fn empty_output_stays_empty() {
        assert_eq!(format_output(b""), "");
        assert_eq!(format_output(b"\n\n"), "");
    }

    #[test]
    fn interior_blank_lines_and_spaces_are_preserved() {
        assert_eq!(format_output(b"  x\n\n  y  \n"), "\n  x\n\n  y  \n");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        assert_eq!(format_output(b"ok\xff"), "ok\u{fffd}");
    }
}
