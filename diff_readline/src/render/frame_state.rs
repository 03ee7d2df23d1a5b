// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::SegmentedLine;

/// One logical line of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub row_span: usize,
    pub plain_text: String,
    pub rendered_text: String,
    pub is_pre_wrapped: bool,
}

impl From<SegmentedLine> for Line {
    fn from(it: SegmentedLine) -> Self {
        Self {
            row_span: it.row_span,
            plain_text: it.plain_text,
            rendered_text: it.rendered_text,
            is_pre_wrapped: it.is_pre_wrapped,
        }
    }
}

/// What the terminal showed after a render. Immutable once built; see
/// [`FrameStateBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameState {
    lines: Vec<Line>,
    actual_rows: usize,
}

impl FrameState {
    #[must_use]
    pub fn empty() -> Self { Self::default() }

    #[must_use]
    pub fn lines(&self) -> &[Line] { &self.lines }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> { self.lines.get(index) }

    #[must_use]
    pub fn len(&self) -> usize { self.lines.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Index of the last logical line, `-1` for an empty frame.
    #[must_use]
    pub fn virtual_rows(&self) -> isize {
        isize::try_from(self.lines.len()).map_or(isize::MAX, |len| len - 1)
    }

    /// Sum of every line's row span.
    #[must_use]
    pub fn actual_rows(&self) -> usize { self.actual_rows }

    /// Rows taken by the lines before `line_index`. Indices past the end count the
    /// whole frame.
    #[must_use]
    pub fn rows_above(&self, line_index: usize) -> usize {
        self.lines
            .iter()
            .take(line_index)
            .map(|line| line.row_span)
            .sum()
    }
}

#[derive(Debug, Default)]
pub struct FrameStateBuilder {
    lines: Vec<Line>,
    actual_rows: usize,
}

impl FrameStateBuilder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append `line` and return its index.
    pub fn push_line(&mut self, line: Line) -> usize {
        self.actual_rows += line.row_span;
        self.lines.push(line);
        self.lines.len() - 1
    }

    #[must_use]
    pub fn build(self) -> FrameState {
        FrameState {
            lines: self.lines,
            actual_rows: self.actual_rows,
        }
    }
}
