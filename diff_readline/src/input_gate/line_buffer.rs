// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{LineEditor, LineEditorEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Grapheme aware single-line editor. The cursor is kept as a grapheme index, so it
/// never lands inside a multi-byte character or a combining sequence.
///
/// | Key                       | Effect                               |
/// |---------------------------|--------------------------------------|
/// | printable                 | insert at cursor                     |
/// | Backspace, Ctrl+H         | delete before cursor                 |
/// | Delete                    | delete at cursor                     |
/// | Left, Right               | move one grapheme                    |
/// | Home, End, Ctrl+A, Ctrl+E | move to start or end                 |
/// | Ctrl+Left, Alt+B          | previous word start                  |
/// | Ctrl+Right, Alt+F         | next word start                      |
/// | Ctrl+U                    | delete to start of line              |
/// | Ctrl+W, Alt+Backspace     | delete previous word                 |
/// | Alt+D                     | delete to end of next word           |
/// | Enter                     | end, [`LineEditorEvent::Submitted`]  |
/// | Ctrl+D                    | [`LineEditorEvent::Eof`] when empty  |
/// | Ctrl+C                    | clear, [`LineEditorEvent::Interrupted`] |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    line: String,
    cursor_grapheme: usize,
    max_len: Option<usize>,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn cursor_grapheme(&self) -> usize { self.cursor_grapheme }

    fn grapheme_count(&self) -> usize { self.line.graphemes(true).count() }

    /// Byte where grapheme `grapheme_index` starts, or the line length past the end.
    fn byte_offset(&self, grapheme_index: usize) -> usize {
        self.line
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.line.len(), |(byte_index, _)| byte_index)
    }

    fn insert_char(&mut self, ch: char) {
        if self
            .max_len
            .is_some_and(|max_len| self.grapheme_count() >= max_len)
        {
            return;
        }
        let at = self.byte_offset(self.cursor_grapheme);
        self.line.insert(at, ch);
        // A combining mark merges into the previous grapheme, so recount.
        self.cursor_grapheme = self.line[..at + ch.len_utf8()].graphemes(true).count();
    }

    fn delete_graphemes(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        self.line.replace_range(start_byte..end_byte, "");
        self.cursor_grapheme = start;
    }

    fn move_to(&mut self, grapheme_index: usize) {
        self.cursor_grapheme = grapheme_index.min(self.grapheme_count());
    }

    fn prev_word_start(&self) -> usize {
        let graphemes: Vec<&str> = self.line.graphemes(true).collect();
        let mut at = self.cursor_grapheme.min(graphemes.len());
        while at > 0 && !is_word_grapheme(graphemes[at - 1]) {
            at -= 1;
        }
        while at > 0 && is_word_grapheme(graphemes[at - 1]) {
            at -= 1;
        }
        at
    }

    fn next_word_start(&self) -> usize {
        let graphemes: Vec<&str> = self.line.graphemes(true).collect();
        let mut at = self.cursor_grapheme;
        while at < graphemes.len() && is_word_grapheme(graphemes[at]) {
            at += 1;
        }
        while at < graphemes.len() && !is_word_grapheme(graphemes[at]) {
            at += 1;
        }
        at
    }

    fn next_word_end(&self) -> usize {
        let graphemes: Vec<&str> = self.line.graphemes(true).collect();
        let mut at = self.cursor_grapheme;
        while at < graphemes.len() && !is_word_grapheme(graphemes[at]) {
            at += 1;
        }
        while at < graphemes.len() && is_word_grapheme(graphemes[at]) {
            at += 1;
        }
        at
    }

    fn apply_control_key(&mut self, code: KeyCode) -> Option<LineEditorEvent> {
        match code {
            KeyCode::Char('c') => {
                self.take_line();
                return Some(LineEditorEvent::Interrupted);
            }
            KeyCode::Char('d') => {
                if self.line.is_empty() {
                    return Some(LineEditorEvent::Eof);
                }
                self.delete_graphemes(self.cursor_grapheme, self.cursor_grapheme + 1);
            }
            KeyCode::Char('h') => {
                self.delete_graphemes(
                    self.cursor_grapheme.saturating_sub(1),
                    self.cursor_grapheme,
                );
            }
            KeyCode::Char('u') => self.delete_graphemes(0, self.cursor_grapheme),
            KeyCode::Char('w') => {
                self.delete_graphemes(self.prev_word_start(), self.cursor_grapheme);
            }
            #[cfg(feature = "emacs")]
            KeyCode::Char('a') => self.move_to(0),
            #[cfg(feature = "emacs")]
            KeyCode::Char('e') => self.move_to(usize::MAX),
            KeyCode::Left => self.move_to(self.prev_word_start()),
            KeyCode::Right => self.move_to(self.next_word_start()),
            _ => {}
        }
        None
    }

    fn apply_alt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('b') => self.move_to(self.prev_word_start()),
            KeyCode::Char('f') => self.move_to(self.next_word_start()),
            KeyCode::Char('d') => {
                self.delete_graphemes(self.cursor_grapheme, self.next_word_end());
            }
            KeyCode::Backspace => {
                self.delete_graphemes(self.prev_word_start(), self.cursor_grapheme);
            }
            _ => {}
        }
    }
}

fn is_word_grapheme(grapheme: &str) -> bool {
    grapheme.chars().any(|ch| ch.is_alphanumeric() || ch == '_')
}

impl LineEditor for LineBuffer {
    fn line(&self) -> &str { &self.line }

    fn cursor(&self) -> usize {
        UnicodeWidthStr::width(&self.line[..self.byte_offset(self.cursor_grapheme)])
    }

    fn len(&self) -> usize { self.grapheme_count() }

    fn apply_key(&mut self, key_event: &KeyEvent) -> Option<LineEditorEvent> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return self.apply_control_key(key_event.code);
        }
        if key_event.modifiers.contains(KeyModifiers::ALT) {
            self.apply_alt_key(key_event.code);
            return None;
        }

        match key_event.code {
            KeyCode::Enter => {
                self.move_to(usize::MAX);
                return Some(LineEditorEvent::Submitted(self.line.clone()));
            }
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Backspace => {
                self.delete_graphemes(
                    self.cursor_grapheme.saturating_sub(1),
                    self.cursor_grapheme,
                );
            }
            KeyCode::Delete => {
                let end = (self.cursor_grapheme + 1).min(self.grapheme_count());
                self.delete_graphemes(self.cursor_grapheme, end);
            }
            KeyCode::Left => self.move_to(self.cursor_grapheme.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.cursor_grapheme + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(usize::MAX),
            _ => {}
        }
        None
    }

    fn set_line(&mut self, line: &str) {
        self.line = line.to_string();
        self.cursor_grapheme = self.grapheme_count();
    }

    fn take_line(&mut self) -> String {
        self.cursor_grapheme = 0;
        std::mem::take(&mut self.line)
    }

    fn set_max_len(&mut self, max_len: Option<usize>) { self.max_len = max_len; }
}
