// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeBool, lock_poisoned_error};
use std::io;

/// Raw mode as it was before the prompt switched it on. Used to put the terminal back
/// the way it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorRawMode {
    WasRaw,
    WasCooked,
    /// The terminal could not be queried. Treated like [`PriorRawMode::WasCooked`] on
    /// restore.
    Unknown,
}

/// Switches raw mode on and off. Mock input devices use
/// [`RawModeDriver::Simulated`] so tests never touch the real terminal.
#[derive(Debug, Clone)]
pub enum RawModeDriver {
    Crossterm,
    Simulated(SafeBool),
}

impl RawModeDriver {
    /// Enable raw mode and report what it was before.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode could not be enabled.
    pub fn enable(&self) -> io::Result<PriorRawMode> {
        match self {
            RawModeDriver::Crossterm => {
                let prior = match crossterm::terminal::is_raw_mode_enabled() {
                    Ok(true) => PriorRawMode::WasRaw,
                    Ok(false) => PriorRawMode::WasCooked,
                    Err(_) => PriorRawMode::Unknown,
                };
                crossterm::terminal::enable_raw_mode()?;
                Ok(prior)
            }
            RawModeDriver::Simulated(flag) => {
                let mut is_raw = flag.lock().map_err(lock_poisoned_error)?;
                let prior = if *is_raw {
                    PriorRawMode::WasRaw
                } else {
                    PriorRawMode::WasCooked
                };
                *is_raw = true;
                Ok(prior)
            }
        }
    }

    /// Put raw mode back to `prior`. Leaves raw mode on if it was on already.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode could not be disabled.
    pub fn restore(&self, prior: PriorRawMode) -> io::Result<()> {
        match prior {
            PriorRawMode::WasRaw => Ok(()),
            PriorRawMode::WasCooked | PriorRawMode::Unknown => self.disable(),
        }
    }

    fn disable(&self) -> io::Result<()> {
        match self {
            RawModeDriver::Crossterm => crossterm::terminal::disable_raw_mode(),
            RawModeDriver::Simulated(flag) => {
                *flag.lock().map_err(lock_poisoned_error)? = false;
                Ok(())
            }
        }
    }
}
