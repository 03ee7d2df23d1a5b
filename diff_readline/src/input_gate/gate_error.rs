// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GateError {
    #[error("stdin is not an interactive terminal")]
    #[diagnostic(
        code(diff_readline::input_gate::not_interactive),
        help("Run this program from a terminal. Piped input can't be edited in raw mode.")
    )]
    NotInteractive,

    #[error("terminal I/O failed")]
    #[diagnostic(code(diff_readline::input_gate::io))]
    Io(#[from] std::io::Error),

    #[error("key or print rule pattern is not a valid regular expression")]
    #[diagnostic(code(diff_readline::input_gate::invalid_pattern))]
    InvalidPattern(#[from] regex::Error),

    #[error("input gate is already closed")]
    #[diagnostic(
        code(diff_readline::input_gate::closed),
        help("Create a new InputGate to read more input.")
    )]
    Closed,
}
