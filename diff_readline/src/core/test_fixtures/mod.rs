// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the terminal: an in-memory stdout, scripted input streams, a cursor
//! model that replays captured output, and device constructors that never touch the
//! real terminal. These are public so that integration tests and downstream crates can
//! drive a prompt headlessly.

// Attach.
pub mod async_input_stream_mock;
pub mod input_device_ext_mock;
pub mod output_device_ext;
pub mod stdout_mock;
pub mod terminal_cursor_model;

// Re-export.
pub use async_input_stream_mock::*;
pub use input_device_ext_mock::*;
pub use output_device_ext::*;
pub use stdout_mock::*;
pub use terminal_cursor_model::*;
