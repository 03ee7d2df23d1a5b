// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Connect to source file.
pub mod common;
pub mod log;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export.
pub use common::*;
pub use log::*;
pub use terminal_io::*;
pub use test_fixtures::*;
