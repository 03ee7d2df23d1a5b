// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{KeyMatcher, PrintRule};

/// Length bounds for the input, counted in grapheme clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLen {
    /// Submit automatically once the input grows to this length.
    pub min: Option<usize>,
    /// Refuse to insert past this length.
    pub max: Option<usize>,
}

/// Options for an [`crate::InputGate`]. Frozen once the gate is constructed.
///
/// ```
/// use diff_readline::{InputGateConfig, KeyMatcher, PrintRule};
///
/// let config = InputGateConfig::default()
///     .valid_inputs([PrintRule::char_range('0', '9')])
///     .filter_keys([KeyMatcher::from_key_str("\t")])
///     .ignore_keys([KeyMatcher::named("up"), KeyMatcher::named("down")])
///     .input_len(None, Some(4));
/// assert_eq!(config.input_len.max, Some(4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputGateConfig {
    /// `None` allows every printable character. `Some(vec![])` allows none.
    pub valid_inputs: Option<Vec<PrintRule>>,
    /// Keys that are rejected with a bell.
    pub filter_keys: Option<Vec<KeyMatcher>>,
    /// Keys that are reported to listeners but never reach the line editor.
    pub ignore_keys: Option<Vec<KeyMatcher>>,
    pub input_len: InputLen,
}

impl InputGateConfig {
    #[must_use]
    pub fn valid_inputs(mut self, rules: impl IntoIterator<Item = PrintRule>) -> Self {
        self.valid_inputs = Some(rules.into_iter().collect());
        self
    }

    #[must_use]
    pub fn filter_keys(mut self, keys: impl IntoIterator<Item = KeyMatcher>) -> Self {
        self.filter_keys = Some(keys.into_iter().collect());
        self
    }

    #[must_use]
    pub fn ignore_keys(mut self, keys: impl IntoIterator<Item = KeyMatcher>) -> Self {
        self.ignore_keys = Some(keys.into_iter().collect());
        self
    }

    #[must_use]
    pub fn input_len(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.input_len = InputLen { min, max };
        self
    }
}
