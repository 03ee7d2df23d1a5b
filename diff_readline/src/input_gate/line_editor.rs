// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyEvent;

/// What a key press asked the gate to do beyond editing the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditorEvent {
    /// Enter. The line stays in the editor with the cursor at its end.
    Submitted(String),
    /// Ctrl+D on an empty line.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// The single-line editor behind an [`crate::InputGate`]. The gate decides which keys
/// reach it, then watches `line()` and `cursor()` for changes.
///
/// [`crate::LineBuffer`] is the default implementation.
pub trait LineEditor {
    fn line(&self) -> &str;

    /// Display column of the edit cursor within the line.
    fn cursor(&self) -> usize;

    /// Length of the line in grapheme clusters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn apply_key(&mut self, key_event: &KeyEvent) -> Option<LineEditorEvent>;

    /// Replace the line and put the cursor at its end.
    fn set_line(&mut self, line: &str);

    /// Return the line and leave the editor empty.
    fn take_line(&mut self) -> String;

    fn set_max_len(&mut self, max_len: Option<usize>);
}
