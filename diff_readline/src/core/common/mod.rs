// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod miette_setup_global_report_handler;
pub mod type_aliases;

// Re-export.
pub use miette_setup_global_report_handler::*;
pub use type_aliases::*;
