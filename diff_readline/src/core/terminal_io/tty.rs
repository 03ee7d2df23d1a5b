// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

impl TTYResult {
    #[must_use]
    pub fn is_interactive(self) -> bool { self == TTYResult::IsInteractive }
}

/// Returns [`TTYResult::IsInteractive`] if stdin is attached to a terminal. Piped or
/// redirected input is not interactive and can't be put into raw mode.
#[must_use]
pub fn is_stdin_interactive() -> TTYResult {
    if std::io::stdin().is_terminal() {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}
