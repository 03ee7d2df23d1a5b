// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::DecodedKey;

/// Notifications sent to every receiver returned by [`crate::InputGate::subscribe`].
///
/// For one key press they arrive in this order: [`GateEvent::Submit`],
/// [`GateEvent::Keypress`], [`GateEvent::Change`], [`GateEvent::Cursor`], and finally
/// [`GateEvent::Close`] if the key ended the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// Every key seen while active, including rejected and ignored ones.
    Keypress { chr: Option<char>, key: DecodedKey },
    /// The input value changed. Carries the new value.
    Change(String),
    /// The edit cursor moved. Carries the new display column within the input.
    Cursor(usize),
    Submit(String),
    Close,
}

/// How [`crate::InputGate::read_line`] finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Submitted(String),
    Closed,
}

/// What the gate did with one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Forwarded,
    Ignored,
    RejectedInvalid,
    RejectedFiltered,
    /// The gate is paused.
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypressResult {
    pub disposition: KeyDisposition,
    /// Set when this key submitted the line or closed the gate.
    pub outcome: Option<GateOutcome>,
}
