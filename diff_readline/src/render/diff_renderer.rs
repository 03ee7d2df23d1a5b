// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Redraw a multi-line frame in place, writing only the logical lines that changed.
//!
//! Each render compares the new frame against the previous one line by line:
//! 1. A line is drawn if it's new, or its rendered text differs.
//! 2. If a line's row span changed, every line from there to the end of the frame is
//!    drawn, since everything below it has shifted.
//! 3. Unchanged lines are skipped by moving the cursor over them, not rewriting them.
//! 4. If the frame got shorter, the rows it no longer covers are cleared.
//!
//! Afterwards the cursor is parked on the input position (see [`CursorTracker`]).

use super::{CursorTracker, FrameState, FrameStateBuilder, InputPosition, Line,
            queue_row_move, segment_line, strip_carriage_return};
use crate::{OutputDevice, StdMutex};
use crossterm::{QueueableCommand,
                cursor::{Hide, MoveToColumn, Show},
                terminal::{Clear, ClearType}};
use std::{io, sync::Arc};

pub type SafeDiffRenderer = Arc<StdMutex<DiffRenderer>>;

/// Who owns the edit cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorTracking {
    /// The caller passes the cursor to [`DiffRenderer::print`].
    Manual,
    /// An [`crate::InputGate`] pushes cursor moves through
    /// [`DiffRenderer::sync_edit_cursor`].
    InputGate,
}

/// What one call to [`DiffRenderer::print`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lines_drawn: usize,
    pub lines_skipped: usize,
    pub cleared_trailing_rows: usize,
}

#[allow(missing_debug_implementations)]
pub struct DiffRenderer {
    output_device: OutputDevice,
    previous_frame: FrameState,
    tracker: CursorTracker,
    cursor_tracking: CursorTracking,
    is_first_render: bool,
    is_cursor_visible: bool,
}

impl DiffRenderer {
    #[must_use]
    pub fn new(output_device: OutputDevice) -> Self {
        Self {
            output_device,
            previous_frame: FrameState::empty(),
            tracker: CursorTracker::default(),
            cursor_tracking: CursorTracking::Manual,
            is_first_render: true,
            is_cursor_visible: true,
        }
    }

    #[must_use]
    pub fn new_shared(output_device: OutputDevice) -> SafeDiffRenderer {
        Arc::new(StdMutex::new(Self::new(output_device)))
    }

    /// Hand the edit cursor over to an input gate. From now on the input line is only
    /// located on the first render, and `cursor` arguments to [`Self::print`] are
    /// ignored.
    pub fn attach_input_tracking(&mut self) {
        self.cursor_tracking = CursorTracking::InputGate;
    }

    #[must_use]
    pub fn cursor_tracking(&self) -> CursorTracking { self.cursor_tracking }

    #[must_use]
    pub fn previous_frame(&self) -> &FrameState { &self.previous_frame }

    #[must_use]
    pub fn input_position(&self) -> InputPosition { self.tracker.input_position }

    pub fn sync_edit_cursor(&mut self, edit_cursor: usize) {
        self.tracker.edit_cursor = edit_cursor;
    }

    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.is_cursor_visible = false;
        let mut term = self.output_device.lock()?;
        term.queue(Hide)?;
        term.flush()
    }

    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.is_cursor_visible = true;
        let mut term = self.output_device.lock()?;
        term.queue(Show)?;
        term.flush()
    }

    /// Move the terminal cursor to the input position in the last rendered frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn restore_cursor(&mut self) -> io::Result<()> {
        let width = self.output_device.width();
        let output_device = self.output_device.clone();
        let mut term = output_device.lock()?;
        self.tracker
            .restore_cursor(&self.previous_frame, width, &mut *term)?;
        term.flush()
    }

    /// Render `text`, where `\n` separates logical lines. `cursor` is the edit cursor
    /// column, used only under [`CursorTracking::Manual`].
    ///
    /// If the write fails partway, the next render redraws every line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn print(&mut self, text: &str, cursor: Option<usize>) -> io::Result<FrameStats> {
        if let (CursorTracking::Manual, Some(edit_cursor)) = (self.cursor_tracking, cursor) {
            self.tracker.edit_cursor = edit_cursor;
        }

        let result = self.render_frame(text);
        if result.is_err() {
            self.previous_frame = FrameState::empty();
        }
        result
    }

    fn render_frame(&mut self, text: &str) -> io::Result<FrameStats> {
        let width = self.output_device.width();
        let pre_wrap_input = self.cursor_tracking == CursorTracking::InputGate;
        let output_device = self.output_device.clone();
        let mut term = output_device.lock()?;

        if self.is_cursor_visible {
            term.queue(Hide)?;
        }

        let mut stats = FrameStats::default();
        let mut builder = FrameStateBuilder::new();
        let mut draw_all_remaining = false;
        // Row where the current line starts. The pending move for a line is the
        // distance from `tracker.cursor_row` to here.
        let mut line_start_row = 0;

        for (index, raw_line) in text.split('\n').enumerate() {
            let segmented =
                segment_line(strip_carriage_return(raw_line), pre_wrap_input, width);

            if let Some(origin_column) = segmented.cursor_column {
                if self.is_first_render || self.cursor_tracking == CursorTracking::Manual {
                    self.tracker.capture_input_line(index, origin_column);
                }
            }

            let line = Line::from(segmented);
            let should_draw = match self.previous_frame.line(index) {
                None => true,
                Some(previous) => {
                    if previous.row_span != line.row_span {
                        draw_all_remaining = true;
                    }
                    draw_all_remaining || previous.rendered_text != line.rendered_text
                }
            };

            if should_draw {
                queue_row_move(&mut *term, self.tracker.cursor_row, line_start_row)?;
                term.queue(MoveToColumn(0))?;
                term.write_all(line.rendered_text.as_bytes())?;
                term.queue(Clear(ClearType::UntilNewLine))?;
                term.write_all(b"\n")?;
                if line.is_pre_wrapped {
                    // Blank the reserved row so rows written match the row span.
                    term.queue(MoveToColumn(0))?;
                    term.queue(Clear(ClearType::UntilNewLine))?;
                    term.write_all(b"\n")?;
                }
                self.tracker.cursor_row = line_start_row + line.row_span;
                stats.lines_drawn += 1;
            } else {
                stats.lines_skipped += 1;
            }

            line_start_row += line.row_span;
            builder.push_line(line);
        }

        let current_frame = builder.build();

        if current_frame.actual_rows() < self.previous_frame.actual_rows() {
            queue_row_move(&mut *term, self.tracker.cursor_row, current_frame.actual_rows())?;
            term.queue(MoveToColumn(0))?;
            term.queue(Clear(ClearType::FromCursorDown))?;
            self.tracker.cursor_row = current_frame.actual_rows();
            stats.cleared_trailing_rows =
                self.previous_frame.actual_rows() - current_frame.actual_rows();
        }

        self.previous_frame = current_frame;
        self.is_first_render = false;

        self.tracker
            .restore_cursor(&self.previous_frame, width, &mut *term)?;

        if self.is_cursor_visible {
            term.queue(Show)?;
        }
        term.flush()?;

        tracing::trace!(
            message = "frame rendered",
            width,
            lines_drawn = stats.lines_drawn,
            lines_skipped = stats.lines_skipped,
            cleared_trailing_rows = stats.cleared_trailing_rows,
            input_position = ?self.tracker.input_position,
        );

        Ok(stats)
    }
}
