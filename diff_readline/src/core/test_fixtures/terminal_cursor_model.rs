// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Replays captured output through a [`vte::Parser`] to find where a real terminal
//! would leave its cursor. Only cursor placement is modeled, cell contents are not.
//!
//! Supported input:
//! - Printable characters, with DECAWM pending wrap: writing the last column leaves the
//!   cursor there, and the next printable character wraps first.
//! - `LF` (down one row, column kept, as in raw mode), `CR`, `BS`.
//! - CSI `A`, `B`, `C`, `D`, `G`. `K` and `J` only cancel a pending wrap.
//!
//! Rows are not clamped to a screen height, so relative moves below the last row keep
//! counting.

use unicode_width::UnicodeWidthChar;
use vte::{Params, Perform};

const LINE_FEED: u8 = b'\n';
const CARRIAGE_RETURN: u8 = b'\r';
const BACKSPACE: u8 = 0x08;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalCursorModel {
    pub row: usize,
    pub column: usize,
    width: usize,
    is_wrap_pending: bool,
}

impl TerminalCursorModel {
    /// Cursor at the origin of a terminal `width` columns wide. `0` means unlimited.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Where the cursor ends up after writing `output`, as `(row, column)`.
    #[must_use]
    pub fn replay(width: usize, output: &str) -> (usize, usize) {
        let mut it = Self::new(width);
        it.feed(output);
        it.position()
    }

    pub fn feed(&mut self, output: &str) {
        let mut parser = vte::Parser::new();
        parser.advance(self, output.as_bytes());
    }

    #[must_use]
    pub fn position(&self) -> (usize, usize) { (self.row, self.column) }

    fn last_column(&self) -> usize { self.width.saturating_sub(1) }

    fn wrap(&mut self) {
        self.row += 1;
        self.column = 0;
        self.is_wrap_pending = false;
    }
}

fn nth_non_zero(params: &Params, n: usize) -> usize {
    params
        .iter()
        .nth(n)
        .and_then(|it| it.first())
        .copied()
        .map_or(1, |it| usize::from(it.max(1)))
}

impl Perform for TerminalCursorModel {
    fn print(&mut self, ch: char) {
        let char_width = ch.width().unwrap_or(0);
        if char_width == 0 {
            return;
        }
        if self.is_wrap_pending {
            self.wrap();
        }
        if self.width > 0 && self.column + char_width > self.width {
            self.wrap();
        }
        self.column += char_width;
        if self.width > 0 && self.column >= self.width {
            self.column = self.last_column();
            self.is_wrap_pending = true;
        }
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            LINE_FEED => {
                self.row += 1;
                self.is_wrap_pending = false;
            }
            CARRIAGE_RETURN => {
                self.column = 0;
                self.is_wrap_pending = false;
            }
            BACKSPACE => {
                self.column = self.column.saturating_sub(1);
                self.is_wrap_pending = false;
            }
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, _intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        let count = nth_non_zero(params, 0);
        match action {
            'A' => self.row = self.row.saturating_sub(count),
            'B' => self.row += count,
            'C' => {
                self.column += count;
                if self.width > 0 {
                    self.column = self.column.min(self.last_column());
                }
            }
            'D' => self.column = self.column.saturating_sub(count),
            'G' => {
                self.column = count - 1;
                if self.width > 0 {
                    self.column = self.column.min(self.last_column());
                }
            }
            'K' | 'J' => {}
            _ => return,
        }
        self.is_wrap_pending = false;
    }
}
