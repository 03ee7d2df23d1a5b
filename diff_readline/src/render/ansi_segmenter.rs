// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Split one logical line into the text that is measured ([`SegmentedLine::plain_text`])
//! and the text that is written ([`SegmentedLine::rendered_text`]).
//!
//! Only SGR sequences (final byte `m`) survive into the rendered text, every other
//! escape sequence is dropped. A save-cursor sequence (`ESC 7` or `CSI s`) is not
//! written either. Instead it marks the column where the editable input begins.

use super::{last_column, plain_width, wrapped_row_count_str};
use regex::Regex;
use std::sync::LazyLock;

/// 7-bit `ESC` or 8-bit `CSI`, optional intermediates, optional numeric parameters, one
/// final byte. `ESC 7` is tried first, otherwise `ESC 7 h` would parse as one sequence
/// with parameter `7`.
#[allow(clippy::expect_used)]
static ANSI_ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\x1b7|[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqrsuy=><]",
    )
    .expect("escape sequence pattern is valid")
});

const SGR_FINAL_CHAR: char = 'm';

fn is_save_cursor_final_char(ch: char) -> bool { ch == '7' || ch == 's' }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedLine {
    /// Terminal rows this line occupies at the width it was segmented for.
    pub row_span: usize,
    pub plain_text: String,
    pub rendered_text: String,
    /// Display column of the save-cursor marker in the plain text, if there was one.
    pub cursor_column: Option<usize>,
    /// The plain text got a trailing `\n` to reserve the row the cursor wraps onto.
    /// The renderer has to write that row too.
    pub is_pre_wrapped: bool,
}

/// Segment one logical line (no `\n` in `text`).
///
/// With `pre_wrap_input` set, a line that carries the marker and whose plain text ends
/// exactly at the right edge gets a trailing `\n` in its plain text. This reserves the
/// row the terminal will wrap the cursor onto.
#[must_use]
pub fn segment_line(text: &str, pre_wrap_input: bool, width: usize) -> SegmentedLine {
    let mut plain_text = String::with_capacity(text.len());
    let mut rendered_text = String::with_capacity(text.len());
    let mut cursor_column = None;
    let mut copied_up_to = 0;

    for escape in ANSI_ESCAPE_REGEX.find_iter(text) {
        let preceding = &text[copied_up_to..escape.start()];
        plain_text.push_str(preceding);
        rendered_text.push_str(preceding);

        match escape.as_str().chars().last() {
            Some(SGR_FINAL_CHAR) => rendered_text.push_str(escape.as_str()),
            Some(ch) if is_save_cursor_final_char(ch) => {
                cursor_column = Some(plain_width(&plain_text));
            }
            _ => {}
        }

        copied_up_to = escape.end();
    }

    let rest = &text[copied_up_to..];
    plain_text.push_str(rest);
    rendered_text.push_str(rest);

    let is_pre_wrapped = pre_wrap_input
        && width > 0
        && cursor_column.is_some()
        && last_column(plain_width(&plain_text), width) == width;
    if is_pre_wrapped {
        plain_text.push('\n');
    }

    SegmentedLine {
        row_span: wrapped_row_count_str(&plain_text, width),
        plain_text,
        rendered_text,
        cursor_column,
        is_pre_wrapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_plain_text_passes_through() {
        let it = segment_line("just text", false, 80);
        assert_eq!(it.plain_text, "just text");
        assert_eq!(it.rendered_text, "just text");
        assert_eq!(it.cursor_column, None);
        assert_eq!(it.row_span, 1);
    }

    #[test]
    fn test_sgr_kept_in_rendered_only() {
        let it = segment_line("\x1b[1;31mred\x1b[0m tail", false, 80);
        assert_eq!(it.plain_text, "red tail");
        assert_eq!(it.rendered_text, "\x1b[1;31mred\x1b[0m tail");
    }

    #[test_case("\x1b[2K" ; "erase line")]
    #[test_case("\x1b[3A" ; "cursor up")]
    #[test_case("\x1b[?25l" ; "hide cursor")]
    #[test_case("\x1b(B" ; "charset")]
    fn test_non_sgr_sequences_are_dropped(escape: &str) {
        let it = segment_line(&format!("a{escape}b"), false, 80);
        assert_eq!(it.plain_text, "ab");
        assert_eq!(it.rendered_text, "ab");
        assert_eq!(it.cursor_column, None);
    }

    #[test_case("\x1b7" ; "esc 7")]
    #[test_case("\x1b[s" ; "csi s")]
    #[test_case("\x1bs" ; "esc s")]
    fn test_save_cursor_marks_column(marker: &str) {
        let it = segment_line(&format!("\x1b[32mName:\x1b[0m {marker}bob"), false, 80);
        assert_eq!(it.cursor_column, Some(6));
        assert_eq!(it.plain_text, "Name: bob");
        assert_eq!(it.rendered_text, "\x1b[32mName:\x1b[0m bob");
    }

    #[test]
    fn test_esc_7_before_final_byte_letter_stays_a_marker() {
        let it = segment_line("\x1b7hello", false, 80);
        assert_eq!(it.cursor_column, Some(0));
        assert_eq!(it.plain_text, "hello");
    }

    #[test]
    fn test_eight_bit_csi_is_recognized() {
        let it = segment_line("a\u{9b}1mb", false, 80);
        assert_eq!(it.plain_text, "ab");
        assert_eq!(it.rendered_text, "a\u{9b}1mb");
    }

    #[test]
    fn test_wrap_counts_plain_text_only() {
        let it = segment_line("\x1b[31m0123456789abc\x1b[0m", false, 10);
        assert_eq!(it.row_span, 2);
    }

    #[test]
    fn test_pre_wrap_pads_full_input_line() {
        let it = segment_line("\x1b7abcdefghij", true, 10);
        assert_eq!(it.plain_text, "abcdefghij\n");
        assert_eq!(it.rendered_text, "abcdefghij");
        assert_eq!(it.row_span, 2);
        assert!(it.is_pre_wrapped);
    }

    #[test]
    fn test_pre_wrap_needs_marker_and_flag() {
        assert_eq!(segment_line("abcdefghij", true, 10).row_span, 1);
        assert_eq!(segment_line("\x1b7abcdefghij", false, 10).row_span, 1);
        assert_eq!(segment_line("\x1b7abcdefghi", true, 10).row_span, 1);
        assert!(!segment_line("\x1b7abcdefghij", false, 10).is_pre_wrapped);
    }

    #[test]
    fn test_pre_wrap_skipped_for_unknown_width() {
        let it = segment_line("\x1b7", true, 0);
        assert_eq!(it.plain_text, "");
        assert_eq!(it.row_span, 1);
    }
}
