// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::GateError;
use regex::Regex;

/// One way a printable character can be allowed into the input. A character is valid
/// when any rule in [`crate::InputGateConfig::valid_inputs`] accepts it.
#[derive(Debug, Clone)]
pub enum PrintRule {
    CodePoint(u32),
    /// Inclusive on both ends.
    Range { start: u32, end: u32 },
    Pattern(Regex),
}

impl PrintRule {
    #[must_use]
    pub fn char(ch: char) -> Self { Self::CodePoint(u32::from(ch)) }

    #[must_use]
    pub fn char_range(start: char, end: char) -> Self {
        Self::Range {
            start: u32::from(start),
            end: u32::from(end),
        }
    }

    /// # Errors
    ///
    /// Returns [`GateError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn pattern(pattern: &str) -> Result<Self, GateError> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// `text` is a key's raw sequence. Code point rules look at its first character.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        let Some(first) = text.chars().next().map(u32::from) else {
            return false;
        };
        match self {
            PrintRule::CodePoint(code_point) => first == *code_point,
            PrintRule::Range { start, end } => (*start..=*end).contains(&first),
            PrintRule::Pattern(regex) => regex.is_match(text),
        }
    }
}

#[must_use]
pub fn is_valid_input(rules: &[PrintRule], text: &str) -> bool {
    rules.iter().any(|rule| rule.accepts(text))
}
