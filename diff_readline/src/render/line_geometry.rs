// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Wrap math for a terminal `width` columns wide. A `width` of `0` means the width is
//! unknown, in which case nothing wraps.
//!
//! Lengths are display columns of plain text (no escape sequences), as measured by
//! [`plain_width`].

use unicode_width::UnicodeWidthStr;

/// Number of terminal rows that `length` columns of text occupy. Empty text still takes
/// one row.
#[must_use]
pub fn wrapped_row_count(length: usize, width: usize) -> usize {
    if width == 0 || length == 0 {
        return 1;
    }
    length.div_ceil(width)
}

/// Rows occupied by `text`, where every `\n` (or `\r\n`) starts a new row.
#[must_use]
pub fn wrapped_row_count_str(text: &str, width: usize) -> usize {
    text.split('\n')
        .map(|segment| wrapped_row_count(plain_width(strip_carriage_return(segment)), width))
        .sum()
}

/// Column just past the last character on the final wrapped row. Ranges over
/// `0..=width`, with `width` meaning the row is exactly full.
#[must_use]
pub fn last_column(length: usize, width: usize) -> usize {
    if width == 0 {
        return length;
    }
    length - width * (wrapped_row_count(length, width) - 1)
}

/// Display columns of plain `text`.
#[must_use]
pub fn plain_width(text: &str) -> usize { UnicodeWidthStr::width(text) }

pub(crate) fn strip_carriage_return(text: &str) -> &str {
    text.strip_suffix('\r').unwrap_or(text)
}
