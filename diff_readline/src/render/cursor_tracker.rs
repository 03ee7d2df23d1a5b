// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{FrameState, last_column, wrapped_row_count};
use crossterm::{QueueableCommand, cursor::{MoveDown, MoveToColumn, MoveUp}};
use std::io::{self, Write};

/// Where the editable input sits in the frame, and where the terminal cursor belongs.
///
/// Rows are counted from the first row of the frame, columns from the left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputPosition {
    /// Column of the save-cursor marker on its line.
    pub origin_column: usize,
    /// Logical line holding the marker.
    pub line_index: usize,
    pub target_column: usize,
    pub target_row: usize,
}

/// Remembers which row the terminal cursor is on, so the renderer can move relative to
/// it, and computes where the cursor should go for the current edit position.
#[derive(Debug, Default)]
pub struct CursorTracker {
    pub input_position: InputPosition,
    /// Row the terminal cursor is on right now.
    pub cursor_row: usize,
    /// Display column of the edit cursor within the input.
    pub edit_cursor: usize,
}

impl CursorTracker {
    pub fn capture_input_line(&mut self, line_index: usize, origin_column: usize) {
        self.input_position.line_index = line_index;
        self.input_position.origin_column = origin_column;
    }

    /// Refresh `target_column` and `target_row` from the edit cursor and `frame`.
    pub fn calc_input_offset(&mut self, frame: &FrameState, width: usize) -> InputPosition {
        let offset_x = self.input_position.origin_column + self.edit_cursor;

        let mut target_column = last_column(offset_x, width);
        let mut target_row = frame.rows_above(self.input_position.line_index)
            + wrapped_row_count(offset_x, width)
            - 1;

        // Cursor sits just past a full row, which the terminal shows at the start of
        // the next one.
        if width > 0 && target_column == width {
            target_column = 0;
            target_row += 1;
        }

        self.input_position.target_column = target_column;
        self.input_position.target_row = target_row;
        self.input_position
    }

    /// Queue the moves that put the terminal cursor on the input position. Does not
    /// flush.
    ///
    /// # Errors
    ///
    /// Returns an error if queueing to `term` fails.
    pub fn restore_cursor(
        &mut self,
        frame: &FrameState,
        width: usize,
        term: &mut dyn Write,
    ) -> io::Result<()> {
        let position = self.calc_input_offset(frame, width);
        queue_row_move(term, self.cursor_row, position.target_row)?;
        term.queue(MoveToColumn(to_u16(position.target_column)))?;
        self.cursor_row = position.target_row;
        Ok(())
    }
}

/// Queue a relative vertical move. Nothing is written when the rows match.
///
/// # Errors
///
/// Returns an error if queueing to `term` fails.
pub fn queue_row_move(term: &mut dyn Write, from_row: usize, to_row: usize) -> io::Result<()> {
    if to_row > from_row {
        term.queue(MoveDown(to_u16(to_row - from_row)))?;
    } else if from_row > to_row {
        term.queue(MoveUp(to_u16(from_row - to_row)))?;
    }
    Ok(())
}

pub(crate) fn to_u16(it: usize) -> u16 { u16::try_from(it).unwrap_or(u16::MAX) }
