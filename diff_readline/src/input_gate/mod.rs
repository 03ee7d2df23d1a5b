// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod decoded_key;
pub mod gate_config;
pub mod gate_error;
pub mod gate_event;
pub mod input_gate_impl;
pub mod key_matcher;
pub mod line_buffer;
pub mod line_editor;
pub mod print_rule;

// Re-export.
pub use decoded_key::*;
pub use gate_config::*;
pub use gate_error::*;
pub use gate_event::*;
pub use input_gate_impl::*;
pub use key_matcher::*;
pub use line_buffer::*;
pub use line_editor::*;
pub use print_rule::*;
