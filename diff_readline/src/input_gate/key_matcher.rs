// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DecodedKey, GateError, is_printable_sequence, relevant_modifiers};
use crossterm::event::KeyModifiers;
use regex::Regex;

/// Describes a key for the filter and ignore sets of an [`crate::InputGateConfig`].
#[derive(Debug, Clone)]
pub enum KeyMatcher {
    /// Matches when the key's raw sequence is exactly this. Modifiers are not checked.
    Sequence(String),
    /// Matches when the regex finds a match in the key's raw sequence.
    Pattern(Regex),
    /// Matches when the key name is equal and the ctrl, alt, and shift state are all
    /// equal.
    Named {
        name: String,
        modifiers: KeyModifiers,
    },
}

impl KeyMatcher {
    #[must_use]
    pub fn sequence(sequence: impl Into<String>) -> Self { Self::Sequence(sequence.into()) }

    /// # Errors
    ///
    /// Returns [`GateError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn pattern(pattern: &str) -> Result<Self, GateError> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::named_with(name, KeyModifiers::NONE)
    }

    #[must_use]
    pub fn named_with(name: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self::Named {
            name: name.into(),
            modifiers: relevant_modifiers(modifiers),
        }
    }

    /// Shorthand: a printable string names a key (`"a"`, `"space"`), anything else is a
    /// raw sequence (`"\t"`, `"\x1b[A"`).
    #[must_use]
    pub fn from_key_str(key: &str) -> Self {
        if is_printable_sequence(key) {
            Self::named(key)
        } else {
            Self::sequence(key)
        }
    }

    #[must_use]
    pub fn matches(&self, key: &DecodedKey) -> bool {
        match self {
            KeyMatcher::Sequence(sequence) => {
                !sequence.is_empty() && key.sequence == *sequence
            }
            KeyMatcher::Pattern(regex) => {
                !key.sequence.is_empty() && regex.is_match(&key.sequence)
            }
            KeyMatcher::Named { name, modifiers } => {
                key.name.as_deref() == Some(name.as_str()) && key.modifiers == *modifiers
            }
        }
    }
}

/// `true` if any matcher in `set` matches `key`.
#[must_use]
pub fn matches_any(set: &[KeyMatcher], key: &DecodedKey) -> bool {
    set.iter().any(|matcher| matcher.matches(key))
}
