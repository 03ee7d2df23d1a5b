// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Every key press passes through the [`InputGate`] in this order:
//! 1. Paused gates drop the key. Closed gates refuse it.
//! 2. A printable key that no rule in `valid_inputs` accepts is rejected with a bell.
//! 3. A key in `filter_keys` is rejected with a bell.
//! 4. Unless it is in `ignore_keys`, the key is applied to the [`LineEditor`].
//! 5. Listeners get [`GateEvent::Keypress`], then [`GateEvent::Change`] and
//!    [`GateEvent::Cursor`] if the value or edit cursor moved.
//!
//! When a [`SafeDiffRenderer`] is registered, the gate keeps the renderer's notion of
//! the edit cursor in sync and parks the terminal cursor on every cursor move.

use super::{DecodedKey, GateError, GateEvent, GateOutcome, InputGateConfig,
            KeyDisposition, KeypressResult, LineBuffer, LineEditor, LineEditorEvent,
            is_valid_input, matches_any};
use crate::{InputDevice, OutputDevice, PriorRawMode, SafeDiffRenderer};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::io;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateLiveness {
    Active,
    /// Keys are dropped without any notification.
    Paused,
    /// Terminal state. Raw mode has been restored.
    Closed,
}

macro_rules! early_return_if_not_active {
    ($self:ident) => {
        match $self.liveness {
            GateLiveness::Active => {}
            GateLiveness::Paused => {
                return Ok(KeypressResult {
                    disposition: KeyDisposition::Dropped,
                    outcome: None,
                });
            }
            GateLiveness::Closed => return Err(GateError::Closed),
        }
    };
}

/// Owns the terminal input for one prompt session. Construct with
/// [`InputGate::try_new`], drive it with [`InputGate::read_line`] (or feed keys with
/// [`InputGate::handle_key_event`]), and call [`InputGate::close`] when done. Dropping
/// an open gate closes it.
#[allow(missing_debug_implementations)]
pub struct InputGate {
    config: InputGateConfig,
    editor: Box<dyn LineEditor>,
    input_device: InputDevice,
    output_device: OutputDevice,
    renderer: Option<SafeDiffRenderer>,
    subscribers: Vec<UnboundedSender<GateEvent>>,
    liveness: GateLiveness,
    prior_raw_mode: PriorRawMode,
}

impl InputGate {
    /// # Errors
    ///
    /// - [`GateError::NotInteractive`] if the input device is not a terminal.
    /// - [`GateError::Io`] if raw mode could not be enabled.
    pub fn try_new(
        config: InputGateConfig,
        input_device: InputDevice,
        output_device: OutputDevice,
    ) -> Result<Self, GateError> {
        Self::try_new_with_editor(
            config,
            input_device,
            output_device,
            Box::new(LineBuffer::new()),
        )
    }

    /// Like [`InputGate::try_new`], with a custom line editor.
    ///
    /// # Errors
    ///
    /// See [`InputGate::try_new`].
    pub fn try_new_with_editor(
        config: InputGateConfig,
        input_device: InputDevice,
        output_device: OutputDevice,
        mut editor: Box<dyn LineEditor>,
    ) -> Result<Self, GateError> {
        if !input_device.is_interactive() {
            return Err(GateError::NotInteractive);
        }

        editor.set_max_len(config.input_len.max);
        let prior_raw_mode = input_device.raw_mode.enable()?;

        tracing::debug!(
            message = "input gate opened",
            ?prior_raw_mode,
            input_len = ?config.input_len,
        );

        Ok(Self {
            config,
            editor,
            input_device,
            output_device,
            renderer: None,
            subscribers: vec![],
            liveness: GateLiveness::Active,
            prior_raw_mode,
        })
    }

    /// A new receiver for [`GateEvent`]s. Receivers that are dropped are forgotten on
    /// the next event.
    pub fn subscribe(&mut self) -> UnboundedReceiver<GateEvent> {
        let (sender, receiver) = unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Let this gate drive the renderer's cursor. The renderer switches to
    /// [`crate::CursorTracking::InputGate`].
    ///
    /// Don't hold the renderer's lock while calling into the gate, the gate locks it
    /// on cursor moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer's lock is poisoned.
    pub fn register_renderer(&mut self, renderer: SafeDiffRenderer) -> Result<(), GateError> {
        {
            let mut it = renderer.lock().map_err(crate::lock_poisoned_error)?;
            it.attach_input_tracking();
            it.sync_edit_cursor(self.editor.cursor());
        }
        self.renderer = Some(renderer);
        Ok(())
    }

    #[must_use]
    pub fn has_renderer(&self) -> bool { self.renderer.is_some() }

    #[must_use]
    pub fn liveness(&self) -> GateLiveness { self.liveness }

    #[must_use]
    pub fn is_paused(&self) -> bool { self.liveness == GateLiveness::Paused }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.liveness == GateLiveness::Closed }

    #[must_use]
    pub fn config(&self) -> &InputGateConfig { &self.config }

    #[must_use]
    pub fn value(&self) -> &str { self.editor.line() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.editor.cursor() }

    /// Length of the value in grapheme clusters.
    #[must_use]
    pub fn input_len(&self) -> usize { self.editor.len() }

    pub fn pause(&mut self) {
        if self.liveness == GateLiveness::Active {
            self.liveness = GateLiveness::Paused;
            tracing::debug!(message = "input gate paused");
        }
    }

    pub fn resume(&mut self) {
        if self.liveness == GateLiveness::Paused {
            self.liveness = GateLiveness::Active;
            tracing::debug!(message = "input gate resumed");
        }
    }

    /// Replace the value, moving the edit cursor to its end.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate is closed or parking the cursor fails.
    pub fn set_value(&mut self, value: &str) -> Result<(), GateError> {
        if self.is_closed() {
            return Err(GateError::Closed);
        }
        let old_cursor = self.editor.cursor();
        self.editor.set_line(value);
        self.emit(&GateEvent::Change(self.editor.line().to_string()));
        self.report_cursor_move(old_cursor)
    }

    /// Clear the value.
    ///
    /// # Errors
    ///
    /// See [`InputGate::set_value`].
    pub fn reset(&mut self) -> Result<(), GateError> { self.set_value("") }

    /// Ring the terminal bell.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn ding(&self) -> Result<(), GateError> {
        self.output_device.ring_bell()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn hide_cursor(&self) -> Result<(), GateError> {
        self.with_renderer_or_device(|renderer| renderer.hide_cursor(), crossterm::cursor::Hide)
    }

    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn show_cursor(&self) -> Result<(), GateError> {
        self.with_renderer_or_device(|renderer| renderer.show_cursor(), crossterm::cursor::Show)
    }

    fn with_renderer_or_device(
        &self,
        on_renderer: impl FnOnce(&mut crate::DiffRenderer) -> io::Result<()>,
        command: impl crossterm::Command,
    ) -> Result<(), GateError> {
        use crossterm::QueueableCommand;
        match &self.renderer {
            Some(renderer) => {
                let mut it = renderer.lock().map_err(crate::lock_poisoned_error)?;
                on_renderer(&mut *it)?;
            }
            None => {
                let mut term = self.output_device.lock()?;
                term.queue(command)?;
                term.flush()?;
            }
        }
        Ok(())
    }

    /// Run one key press through the gate. See the module docs for the order of
    /// checks.
    ///
    /// # Errors
    ///
    /// - [`GateError::Closed`] if the gate is closed.
    /// - [`GateError::Io`] if ringing the bell or parking the cursor fails.
    pub fn handle_key_event(
        &mut self,
        key_event: &KeyEvent,
    ) -> Result<KeypressResult, GateError> {
        early_return_if_not_active!(self);

        let key = DecodedKey::from(key_event);

        if let Some(disposition) = self.rejection_for(&key) {
            tracing::debug!(message = "key rejected", ?disposition, sequence = ?key.sequence);
            self.ding()?;
            self.emit(&GateEvent::Keypress {
                chr: key.chr(),
                key,
            });
            return Ok(KeypressResult {
                disposition,
                outcome: None,
            });
        }

        let is_ignored = self
            .config
            .ignore_keys
            .as_deref()
            .is_some_and(|ignore_keys| matches_any(ignore_keys, &key));

        let old_value = self.editor.line().to_string();
        let old_len = self.editor.len();
        let old_cursor = self.editor.cursor();

        let mut outcome = None;
        if !is_ignored {
            match self.editor.apply_key(key_event) {
                Some(LineEditorEvent::Submitted(value)) => {
                    outcome = Some(GateOutcome::Submitted(value));
                }
                Some(LineEditorEvent::Eof | LineEditorEvent::Interrupted) => {
                    outcome = Some(GateOutcome::Closed);
                }
                None => {
                    if self.reached_min_len(old_len) {
                        outcome = Some(GateOutcome::Submitted(self.editor.line().to_string()));
                    }
                }
            }
        }

        if let Some(GateOutcome::Submitted(value)) = &outcome {
            tracing::debug!(message = "input submitted", value = ?value);
            self.emit(&GateEvent::Submit(value.clone()));
        }

        self.emit(&GateEvent::Keypress {
            chr: key.chr(),
            key,
        });

        if self.editor.line() != old_value {
            self.emit(&GateEvent::Change(self.editor.line().to_string()));
        }
        self.report_cursor_move(old_cursor)?;

        if outcome == Some(GateOutcome::Closed) {
            self.close()?;
        }

        Ok(KeypressResult {
            disposition: if is_ignored {
                KeyDisposition::Ignored
            } else {
                KeyDisposition::Forwarded
            },
            outcome,
        })
    }

    /// Read key events until the line is submitted, the gate closes, or the input
    /// stream ends. Non-key events and key releases are skipped.
    ///
    /// # Errors
    ///
    /// - [`GateError::Io`] if the input stream yields an error.
    /// - Any error from [`InputGate::handle_key_event`] other than
    ///   [`GateError::Closed`].
    pub async fn read_line(&mut self) -> Result<GateOutcome, GateError> {
        loop {
            if self.is_closed() {
                return Ok(GateOutcome::Closed);
            }

            let Some(maybe_event) = self.input_device.next().await else {
                tracing::debug!(message = "input stream ended");
                self.close()?;
                return Ok(GateOutcome::Closed);
            };

            let Event::Key(key_event) = maybe_event? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(outcome) = self.handle_key_event(&key_event)?.outcome {
                return Ok(outcome);
            }
        }
    }

    /// Stop listening, notify [`GateEvent::Close`], and put raw mode back the way it
    /// was found. Calling this again does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode could not be restored.
    pub fn close(&mut self) -> Result<(), GateError> {
        if self.is_closed() {
            return Ok(());
        }
        self.liveness = GateLiveness::Closed;
        self.emit(&GateEvent::Close);
        self.subscribers.clear();
        self.input_device.raw_mode.restore(self.prior_raw_mode)?;
        tracing::debug!(message = "input gate closed", prior_raw_mode = ?self.prior_raw_mode);
        Ok(())
    }

    fn rejection_for(&self, key: &DecodedKey) -> Option<KeyDisposition> {
        if let Some(valid_inputs) = &self.config.valid_inputs {
            if key.is_printable() && !is_valid_input(valid_inputs, &key.sequence) {
                return Some(KeyDisposition::RejectedInvalid);
            }
        }
        if let Some(filter_keys) = &self.config.filter_keys {
            if matches_any(filter_keys, key) {
                return Some(KeyDisposition::RejectedFiltered);
            }
        }
        None
    }

    /// `true` when this key took the value from below the minimum length to at least
    /// the minimum.
    fn reached_min_len(&self, old_len: usize) -> bool {
        self.config
            .input_len
            .min
            .is_some_and(|min| old_len < min && self.editor.len() >= min)
    }

    fn report_cursor_move(&mut self, old_cursor: usize) -> Result<(), GateError> {
        let new_cursor = self.editor.cursor();
        if new_cursor == old_cursor {
            return Ok(());
        }
        if let Some(renderer) = &self.renderer {
            let mut it = renderer.lock().map_err(crate::lock_poisoned_error)?;
            it.sync_edit_cursor(new_cursor);
            it.restore_cursor()?;
        }
        self.emit(&GateEvent::Cursor(new_cursor));
        Ok(())
    }

    fn emit(&mut self, event: &GateEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

impl Drop for InputGate {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(message = "failed to close input gate on drop", error = %err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffRenderer, InputDeviceExt, KeyMatcher, OutputDeviceExt, PrintRule,
                StdoutMock, key_event, key_events_for_text};
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn gate(config: InputGateConfig) -> (InputGate, StdoutMock) {
        let (output_device, stdout_mock) = OutputDevice::new_mock(80);
        let gate =
            InputGate::try_new(config, InputDevice::new_mock(vec![]), output_device).unwrap();
        (gate, stdout_mock)
    }

    fn press(gate: &mut InputGate, code: KeyCode) -> KeypressResult {
        gate.handle_key_event(&KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn drain(receiver: &mut UnboundedReceiver<GateEvent>) -> Vec<GateEvent> {
        let mut events = vec![];
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    fn bell_count(stdout_mock: &StdoutMock) -> usize {
        stdout_mock
            .get_copy_of_buffer_as_string()
            .matches('\x07')
            .count()
    }

    #[test]
    fn test_forwarded_key_emits_keypress_change_cursor() {
        let (mut gate, _) = gate(InputGateConfig::default());
        let mut receiver = gate.subscribe();

        let result = press(&mut gate, KeyCode::Char('a'));

        assert_eq!(result.disposition, KeyDisposition::Forwarded);
        let events = drain(&mut receiver);
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], GateEvent::Keypress { chr: Some('a'), .. }));
        assert_eq!(events[1], GateEvent::Change("a".into()));
        assert_eq!(events[2], GateEvent::Cursor(1));
    }

    #[test]
    fn test_empty_valid_inputs_rejects_every_printable() {
        let (mut gate, stdout_mock) = gate(InputGateConfig::default().valid_inputs([]));
        let mut receiver = gate.subscribe();

        for ch in "abc".chars() {
            let result = press(&mut gate, KeyCode::Char(ch));
            assert_eq!(result.disposition, KeyDisposition::RejectedInvalid);
        }

        assert_eq!(gate.value(), "");
        assert_eq!(bell_count(&stdout_mock), 3);
        let events = drain(&mut receiver);
        assert!(events.iter().all(|it| matches!(it, GateEvent::Keypress { .. })));
    }

    #[test]
    fn test_validity_applies_to_printable_keys_only() {
        let (mut gate, stdout_mock) =
            gate(InputGateConfig::default().valid_inputs([PrintRule::char_range('0', '9')]));

        press(&mut gate, KeyCode::Char('4'));
        press(&mut gate, KeyCode::Char('x'));
        press(&mut gate, KeyCode::Left);

        assert_eq!(gate.value(), "4");
        assert_eq!(gate.cursor(), 0);
        assert_eq!(bell_count(&stdout_mock), 1);
    }

    #[test]
    fn test_filtered_key_rings_bell() {
        let (mut gate, stdout_mock) =
            gate(InputGateConfig::default().filter_keys([KeyMatcher::from_key_str("\t")]));

        let result = press(&mut gate, KeyCode::Tab);

        assert_eq!(result.disposition, KeyDisposition::RejectedFiltered);
        assert_eq!(bell_count(&stdout_mock), 1);
    }

    #[test]
    fn test_ignored_key_is_reported_but_not_applied() {
        let (mut gate, stdout_mock) =
            gate(InputGateConfig::default().ignore_keys([KeyMatcher::named("left")]));
        gate.set_value("ab").unwrap();
        let mut receiver = gate.subscribe();

        let result = press(&mut gate, KeyCode::Left);

        assert_eq!(result.disposition, KeyDisposition::Ignored);
        assert_eq!(gate.cursor(), 2);
        assert_eq!(bell_count(&stdout_mock), 0);
        let events = drain(&mut receiver);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GateEvent::Keypress { .. }));
    }

    #[test]
    fn test_min_len_submits_on_crossing() {
        let (mut gate, _) = gate(InputGateConfig::default().input_len(Some(3), None));
        let mut receiver = gate.subscribe();

        assert_eq!(press(&mut gate, KeyCode::Char('a')).outcome, None);
        assert_eq!(press(&mut gate, KeyCode::Char('b')).outcome, None);
        drain(&mut receiver);

        let result = press(&mut gate, KeyCode::Char('c'));

        assert_eq!(result.outcome, Some(GateOutcome::Submitted("abc".into())));
        assert_eq!(drain(&mut receiver)[0], GateEvent::Submit("abc".into()));
        assert_eq!(gate.value(), "abc");

        // Already past min, so growing further does not submit again.
        assert_eq!(press(&mut gate, KeyCode::Char('d')).outcome, None);
        assert_eq!(gate.value(), "abcd");
    }

    #[test]
    fn test_max_len_caps_value() {
        let (mut gate, _) = gate(InputGateConfig::default().input_len(None, Some(2)));
        for ch in "abcd".chars() {
            press(&mut gate, KeyCode::Char(ch));
        }
        assert_eq!(gate.value(), "ab");
        assert_eq!(gate.input_len(), 2);
    }

    #[test]
    fn test_enter_submits_first_and_keeps_value() {
        let (mut gate, _) = gate(InputGateConfig::default());
        gate.set_value("hi").unwrap();
        let mut receiver = gate.subscribe();

        let result = press(&mut gate, KeyCode::Enter);

        assert_eq!(result.outcome, Some(GateOutcome::Submitted("hi".into())));
        let events = drain(&mut receiver);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GateEvent::Submit("hi".into()));
        assert!(matches!(&events[1], GateEvent::Keypress { .. }));
        assert_eq!(gate.value(), "hi");
        assert_eq!(gate.cursor(), 2);
    }

    #[test]
    fn test_enter_mid_line_moves_cursor_to_end() {
        let (mut gate, _) = gate(InputGateConfig::default());
        gate.set_value("hey").unwrap();
        press(&mut gate, KeyCode::Left);
        press(&mut gate, KeyCode::Left);
        let mut receiver = gate.subscribe();

        press(&mut gate, KeyCode::Enter);

        assert_eq!(drain(&mut receiver).last(), Some(&GateEvent::Cursor(3)));
        assert_eq!(gate.value(), "hey");
    }

    #[test]
    fn test_paused_gate_drops_keys_silently() {
        let (mut gate, stdout_mock) = gate(InputGateConfig::default().valid_inputs([]));
        let mut receiver = gate.subscribe();
        gate.pause();

        let result = press(&mut gate, KeyCode::Char('a'));

        assert_eq!(result.disposition, KeyDisposition::Dropped);
        assert!(drain(&mut receiver).is_empty());
        assert_eq!(bell_count(&stdout_mock), 0);

        gate.resume();
        assert_eq!(press(&mut gate, KeyCode::Char('a')).disposition, KeyDisposition::RejectedInvalid);
    }

    #[test]
    fn test_close_is_idempotent_and_restores_raw_mode() {
        let (output_device, _) = OutputDevice::new_mock(80);
        let (input_device, raw_mode_flag) = InputDevice::new_mock_with_raw_mode_flag(vec![], false);
        let mut gate =
            InputGate::try_new(InputGateConfig::default(), input_device, output_device).unwrap();
        assert!(*raw_mode_flag.lock().unwrap());
        let mut receiver = gate.subscribe();

        gate.close().unwrap();
        gate.close().unwrap();

        assert!(!*raw_mode_flag.lock().unwrap());
        assert_eq!(drain(&mut receiver), vec![GateEvent::Close]);
        assert!(matches!(
            gate.handle_key_event(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Err(GateError::Closed)
        ));
    }

    #[test]
    fn test_already_raw_terminal_stays_raw_after_close() {
        let (output_device, _) = OutputDevice::new_mock(80);
        let (input_device, raw_mode_flag) = InputDevice::new_mock_with_raw_mode_flag(vec![], true);
        let gate =
            InputGate::try_new(InputGateConfig::default(), input_device, output_device).unwrap();
        drop(gate);
        assert!(*raw_mode_flag.lock().unwrap());
    }

    #[test]
    fn test_non_interactive_input_is_refused() {
        let (output_device, _) = OutputDevice::new_mock(80);
        let result = InputGate::try_new(
            InputGateConfig::default(),
            InputDevice::new_mock_non_interactive(vec![]),
            output_device,
        );
        assert!(matches!(result, Err(GateError::NotInteractive)));
    }

    #[test]
    fn test_ctrl_c_closes_gate() {
        let (mut gate, _) = gate(InputGateConfig::default());
        let mut receiver = gate.subscribe();

        let result = gate
            .handle_key_event(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();

        assert_eq!(result.outcome, Some(GateOutcome::Closed));
        assert!(gate.is_closed());
        assert_eq!(drain(&mut receiver).last(), Some(&GateEvent::Close));
    }

    #[test]
    fn test_cursor_moves_are_pushed_to_renderer() {
        let (output_device, _) = OutputDevice::new_mock(80);
        let renderer = DiffRenderer::new_shared(output_device.clone());
        let mut gate = InputGate::try_new(
            InputGateConfig::default(),
            InputDevice::new_mock(vec![]),
            output_device,
        )
        .unwrap();
        gate.register_renderer(renderer.clone()).unwrap();
        renderer.lock().unwrap().print("> \x1b7", None).unwrap();

        press(&mut gate, KeyCode::Char('x'));
        press(&mut gate, KeyCode::Char('y'));

        let position = renderer.lock().unwrap().input_position();
        assert_eq!(position.target_column, 4);
    }

    #[tokio::test]
    async fn test_read_line_until_enter() {
        let (output_device, _) = OutputDevice::new_mock(80);
        let mut events = key_events_for_text("hey");
        events.push(key_event(KeyCode::Enter, KeyModifiers::NONE));
        let mut gate = InputGate::try_new(
            InputGateConfig::default(),
            InputDevice::new_mock(events),
            output_device,
        )
        .unwrap();

        let outcome = gate.read_line().await.unwrap();

        assert_eq!(outcome, GateOutcome::Submitted("hey".into()));
        assert!(!gate.is_closed());
    }

    #[tokio::test]
    async fn test_read_line_closes_when_input_ends() {
        let (output_device, _) = OutputDevice::new_mock(80);
        let mut gate = InputGate::try_new(
            InputGateConfig::default(),
            InputDevice::new_mock(key_events_for_text("partial")),
            output_device,
        )
        .unwrap();

        let outcome = gate.read_line().await.unwrap();

        assert_eq!(outcome, GateOutcome::Closed);
        assert!(gate.is_closed());
        assert_eq!(gate.value(), "partial");
    }
}
