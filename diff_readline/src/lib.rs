// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # diff_readline
//!
//! Flicker free, multi-line interactive prompts for the terminal. Two pieces work
//! together:
//!
//! 1. [`DiffRenderer`] redraws a block of text in place. Each call to
//!    [`DiffRenderer::print`] compares the new frame against what is already on screen
//!    and only rewrites the logical lines that changed. Lines that wrap are accounted
//!    for, so when one line grows onto an extra row everything below it is redrawn.
//! 2. [`InputGate`] owns raw mode input for one prompt session. Every key press is
//!    checked against the [`InputGateConfig`]: printable characters must match
//!    [`InputGateConfig::valid_inputs`], keys in [`InputGateConfig::filter_keys`] are
//!    refused with a bell, and keys in [`InputGateConfig::ignore_keys`] are reported
//!    but never edit the line. Listeners get [`GateEvent`]s over tokio channels.
//!
//! The editable input's place in the frame is marked with a save-cursor escape
//! (`ESC 7` or `CSI s`). After each render, and on each cursor move once a gate is
//! registered with the renderer, the terminal cursor is parked at that position plus
//! the edit cursor.
//!
//! ```no_run
//! use diff_readline::{DiffRenderer, GateOutcome, InputDevice, InputGate,
//!                     InputGateConfig, OutputDevice};
//! use miette::IntoDiagnostic;
//!
//! # async fn run() -> miette::Result<()> {
//! let output_device = OutputDevice::new_stdout();
//! let renderer = DiffRenderer::new_shared(output_device.clone());
//! let mut gate = InputGate::try_new(
//!     InputGateConfig::default(),
//!     InputDevice::new_event_stream(),
//!     output_device,
//! )?;
//! gate.register_renderer(renderer.clone())?;
//!
//! if let Ok(mut it) = renderer.lock() {
//!     it.print("Name: \x1b7", None).into_diagnostic()?;
//! }
//! if let GateOutcome::Submitted(name) = gate.read_line().await? {
//!     gate.close()?;
//!     println!("hello {name}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Test doubles for both devices live in [`crate::core::test_fixtures`], see
//! [`OutputDeviceExt`] and [`InputDeviceExt`].

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod core;
pub mod input_gate;
pub mod render;

// Re-export.
pub use crate::core::*;
pub use input_gate::*;
pub use render::*;
