// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeRawTerminal, SendRawTerminal, StdMutex, lock_poisoned_error};
use std::{io, sync::Arc};

/// Where the column count used for wrap math comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSource {
    /// Ask the terminal on every render, so resizes are picked up. Reads as `0` when
    /// the size is unknown (eg: output is not a terminal).
    Terminal,
    Fixed(u16),
}

impl WidthSource {
    #[must_use]
    pub fn query(self) -> usize {
        match self {
            WidthSource::Terminal => crossterm::terminal::size()
                .map_or(0, |(columns, _rows)| usize::from(columns)),
            WidthSource::Fixed(columns) => usize::from(columns),
        }
    }
}

/// The terminal the prompt is drawn to, plus how to learn its width.
/// - It is safe to clone, clones share the same writer.
/// - See [`crate::OutputDeviceExt::new_mock()`] for tests.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub width_source: WidthSource,
    pub is_mock: bool,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stdout())),
            width_source: WidthSource::Terminal,
            is_mock: false,
        }
    }

    /// Current column count, `0` if unknown.
    #[must_use]
    pub fn width(&self) -> usize { self.width_source.query() }

    /// Don't call this twice in the same scope, the second call will deadlock.
    ///
    /// # Errors
    ///
    /// Returns an error if a previous holder of the lock panicked.
    pub fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, SendRawTerminal>> {
        self.resource.lock().map_err(lock_poisoned_error)
    }

    /// Write a single BEL byte and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn ring_bell(&self) -> io::Result<()> {
        let mut term = self.lock()?;
        term.write_all(b"\x07")?;
        term.flush()
    }
}
