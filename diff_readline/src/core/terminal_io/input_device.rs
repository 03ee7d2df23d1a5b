// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermEventResult, PinnedInputStream, RawModeDriver, TTYResult,
            is_stdin_interactive};
use crossterm::event::EventStream;
use futures_util::{FutureExt, StreamExt};

/// The source of key events for the prompt, along with what the prompt needs to know
/// about the terminal behind it. See [`crate::InputDeviceExt`] for test doubles.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<CrosstermEventResult>,
    pub interactivity: TTYResult,
    pub raw_mode: RawModeDriver,
}

impl InputDevice {
    #[must_use]
    pub fn new_event_stream() -> InputDevice {
        InputDevice {
            resource: Box::pin(EventStream::new()),
            interactivity: is_stdin_interactive(),
            raw_mode: RawModeDriver::Crossterm,
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool { self.interactivity.is_interactive() }

    /// `None` once the stream is exhausted.
    pub async fn next(&mut self) -> Option<CrosstermEventResult> {
        self.resource.next().fuse().await
    }
}
