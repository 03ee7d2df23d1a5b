// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press described the way terminals and matchers see it: an optional key name,
/// the raw byte sequence the key produces, and its modifiers.
///
/// | Key          | `name`      | `sequence`    |
/// |--------------|-------------|---------------|
/// | `a`          | `a`         | `a`           |
/// | `A`          | `a` + shift | `A`           |
/// | `!`          | none        | `!`           |
/// | Ctrl+C       | `c` + ctrl  | `\x03`        |
/// | Alt+x        | `x` + alt   | `\x1bx`       |
/// | Enter        | `return`    | `\r`          |
/// | Tab          | `tab`       | `\t`          |
/// | Left         | `left`      | `\x1b[D`      |
/// | F5           | `f5`        | `\x1b[15~`    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    pub name: Option<String>,
    pub sequence: String,
    /// Only [`KeyModifiers::CONTROL`], [`KeyModifiers::ALT`] and
    /// [`KeyModifiers::SHIFT`] are kept.
    pub modifiers: KeyModifiers,
}

#[must_use]
pub fn relevant_modifiers(modifiers: KeyModifiers) -> KeyModifiers {
    modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT)
}

/// A sequence is printable when its first character is in the ASCII range
/// `' '..='~'`.
#[must_use]
pub fn is_printable_sequence(sequence: &str) -> bool {
    sequence
        .chars()
        .next()
        .is_some_and(|ch| (' '..='~').contains(&ch))
}

impl DecodedKey {
    #[must_use]
    pub fn is_printable(&self) -> bool { is_printable_sequence(&self.sequence) }

    #[must_use]
    pub fn ctrl(&self) -> bool { self.modifiers.contains(KeyModifiers::CONTROL) }

    #[must_use]
    pub fn alt(&self) -> bool { self.modifiers.contains(KeyModifiers::ALT) }

    #[must_use]
    pub fn shift(&self) -> bool { self.modifiers.contains(KeyModifiers::SHIFT) }

    /// The character this key types, if its sequence is a single character.
    #[must_use]
    pub fn chr(&self) -> Option<char> {
        let mut chars = self.sequence.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

impl From<&KeyEvent> for DecodedKey {
    fn from(key_event: &KeyEvent) -> Self {
        let mut modifiers = relevant_modifiers(key_event.modifiers);
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);

        let (name, sequence): (Option<String>, String) = match key_event.code {
            KeyCode::Char(ch) => {
                if ch.is_ascii_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                let (name, sequence) = decode_char(ch, ctrl);
                let sequence = if alt { format!("\x1b{sequence}") } else { sequence };
                (name, sequence)
            }
            KeyCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                named("tab", "\x1b[Z")
            }
            KeyCode::Enter => named("return", "\r"),
            KeyCode::Tab => named("tab", "\t"),
            KeyCode::Backspace => named("backspace", "\x7f"),
            KeyCode::Esc => named("escape", "\x1b"),
            KeyCode::Up => named("up", "\x1b[A"),
            KeyCode::Down => named("down", "\x1b[B"),
            KeyCode::Right => named("right", "\x1b[C"),
            KeyCode::Left => named("left", "\x1b[D"),
            KeyCode::Home => named("home", "\x1b[H"),
            KeyCode::End => named("end", "\x1b[F"),
            KeyCode::Insert => named("insert", "\x1b[2~"),
            KeyCode::Delete => named("delete", "\x1b[3~"),
            KeyCode::PageUp => named("pageup", "\x1b[5~"),
            KeyCode::PageDown => named("pagedown", "\x1b[6~"),
            KeyCode::F(number) => (
                Some(format!("f{number}")),
                function_key_sequence(number).unwrap_or_default(),
            ),
            _ => (None, String::new()),
        };

        Self {
            name,
            sequence,
            modifiers,
        }
    }
}

fn named(name: &str, sequence: &str) -> (Option<String>, String) {
    (Some(name.to_string()), sequence.to_string())
}

fn decode_char(ch: char, ctrl: bool) -> (Option<String>, String) {
    if ctrl && ch.is_ascii_alphabetic() {
        let lower = ch.to_ascii_lowercase();
        let control_byte = char::from(u8::try_from(lower).unwrap_or_default() & 0x1f);
        return (Some(lower.to_string()), control_byte.to_string());
    }
    match ch {
        ' ' if ctrl => (Some("space".into()), "\0".into()),
        ' ' => (Some("space".into()), " ".into()),
        _ if ch.is_ascii_alphanumeric() => {
            (Some(ch.to_ascii_lowercase().to_string()), ch.to_string())
        }
        _ => (None, ch.to_string()),
    }
}

fn function_key_sequence(number: u8) -> Option<String> {
    let it = match number {
        1 => "\x1bOP",
        2 => "\x1bOQ",
        3 => "\x1bOR",
        4 => "\x1bOS",
        5 => "\x1b[15~",
        6 => "\x1b[17~",
        7 => "\x1b[18~",
        8 => "\x1b[19~",
        9 => "\x1b[20~",
        10 => "\x1b[21~",
        11 => "\x1b[23~",
        12 => "\x1b[24~",
        _ => return None,
    };
    Some(it.to_string())
}
