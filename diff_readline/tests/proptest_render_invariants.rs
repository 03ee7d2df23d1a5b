// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Property-based invariant tests for wrap math, segmentation, and diff rendering.
//!
//! 1. A line always takes at least one row, and enough rows to hold its length.
//! 2. Rows and last column reconstruct the length.
//! 3. Text without escape sequences segments to itself.
//! 4. Rendering the same frame twice writes no lines the second time.
//! 5. An empty set of valid inputs keeps the value empty whatever is typed.
//! 6. A minimum length submits exactly once, on the key that reaches it.
//! 7. After every key and redraw, the terminal cursor is where the tracker says.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use diff_readline::{DiffRenderer, GateOutcome, InputDevice, InputDeviceExt, InputGate,
                    InputGateConfig, OutputDevice, OutputDeviceExt, TerminalCursorModel,
                    last_column, segment_line, wrapped_row_count};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rows_hold_the_whole_length(length in 0usize..5_000, width in 1usize..500) {
        let rows = wrapped_row_count(length, width);
        prop_assert!(rows >= 1);
        prop_assert!(rows * width >= length);
        prop_assert!(length == 0 || (rows - 1) * width < length);
    }
}

proptest! {
    #[test]
    fn rows_and_last_column_reconstruct_length(length in 1usize..5_000, width in 1usize..500) {
        let rows = wrapped_row_count(length, width);
        let column = last_column(length, width);
        prop_assert!((1..=width).contains(&column));
        prop_assert_eq!((rows - 1) * width + column, length);
    }
}

proptest! {
    #[test]
    fn plain_text_segments_to_itself(text in "[ -~]{0,80}", width in 0usize..120) {
        let it = segment_line(&text, false, width);
        prop_assert_eq!(&it.plain_text, &text);
        prop_assert_eq!(&it.rendered_text, &text);
        prop_assert_eq!(it.cursor_column, None);
    }
}

proptest! {
    #[test]
    fn second_identical_render_draws_nothing(
        text in "[ -~\n]{0,160}",
        width in 1u16..60,
    ) {
        let (output_device, _stdout_mock) = OutputDevice::new_mock(width);
        let mut renderer = DiffRenderer::new(output_device);
        renderer.print(&text, None).unwrap();

        let stats = renderer.print(&text, None).unwrap();

        prop_assert_eq!(stats.lines_drawn, 0);
        prop_assert_eq!(stats.cleared_trailing_rows, 0);
        prop_assert_eq!(stats.lines_skipped, text.split('\n').count());
    }
}

proptest! {
    #[test]
    fn empty_valid_inputs_keep_value_empty(typed in "[ -~]{1,40}") {
        let (output_device, stdout_mock) = OutputDevice::new_mock(80);
        let mut gate = InputGate::try_new(
            InputGateConfig::default().valid_inputs([]),
            InputDevice::new_mock(vec![]),
            output_device,
        )
        .unwrap();

        for ch in typed.chars() {
            gate.handle_key_event(&KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
                .unwrap();
        }

        prop_assert_eq!(gate.value(), "");
        prop_assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string().matches('\x07').count(),
            typed.chars().count()
        );
    }
}

proptest! {
    #[test]
    fn min_len_submits_once_at_the_boundary(typed in "[a-z]{0,20}", min in 1usize..12) {
        let (output_device, _stdout_mock) = OutputDevice::new_mock(80);
        let mut gate = InputGate::try_new(
            InputGateConfig::default().input_len(Some(min), None),
            InputDevice::new_mock(vec![]),
            output_device,
        )
        .unwrap();

        let mut submissions = Vec::new();
        for (index, ch) in typed.chars().enumerate() {
            let result = gate
                .handle_key_event(&KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
                .unwrap();
            if let Some(GateOutcome::Submitted(value)) = result.outcome {
                submissions.push((index, value));
            }
        }

        if typed.len() >= min {
            prop_assert_eq!(submissions, vec![(min - 1, typed[..min].to_string())]);
        } else {
            prop_assert!(submissions.is_empty());
        }
        prop_assert_eq!(gate.value(), typed.as_str());
    }
}

proptest! {
    #[test]
    fn terminal_cursor_matches_tracked_input_position(
        typed in "[a-z ]{0,40}",
        width in 4u16..16,
    ) {
        let (output_device, stdout_mock) = OutputDevice::new_mock(width);
        let renderer = DiffRenderer::new_shared(output_device.clone());
        let mut gate = InputGate::try_new(
            InputGateConfig::default(),
            InputDevice::new_mock(vec![]),
            output_device,
        )
        .unwrap();
        gate.register_renderer(renderer.clone()).unwrap();
        renderer.lock().unwrap().print("> \x1b7", None).unwrap();

        for ch in typed.chars() {
            gate.handle_key_event(&KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
                .unwrap();
            let frame = format!("> \x1b7{}", gate.value());
            renderer.lock().unwrap().print(&frame, None).unwrap();

            let position = renderer.lock().unwrap().input_position();
            prop_assert_eq!(
                TerminalCursorModel::replay(
                    usize::from(width),
                    &stdout_mock.get_copy_of_buffer_as_string(),
                ),
                (position.target_row, position.target_column)
            );
        }
    }
}
