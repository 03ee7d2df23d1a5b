// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermEventResult, InputDevice, RawModeDriver, SafeBool, StdMutex,
            TTYResult, gen_input_stream};
use std::sync::Arc;

pub trait InputDeviceExt {
    /// Interactive mock that replays `generator_vec`. Raw mode is simulated.
    fn new_mock(generator_vec: Vec<CrosstermEventResult>) -> InputDevice;

    /// Like [`InputDeviceExt::new_mock()`], also returning the simulated raw mode flag
    /// so tests can check it gets restored.
    fn new_mock_with_raw_mode_flag(
        generator_vec: Vec<CrosstermEventResult>,
        starts_raw: bool,
    ) -> (InputDevice, SafeBool);

    /// Stands in for piped stdin.
    fn new_mock_non_interactive(generator_vec: Vec<CrosstermEventResult>) -> InputDevice;
}

impl InputDeviceExt for InputDevice {
    fn new_mock(generator_vec: Vec<CrosstermEventResult>) -> InputDevice {
        Self::new_mock_with_raw_mode_flag(generator_vec, false).0
    }

    fn new_mock_with_raw_mode_flag(
        generator_vec: Vec<CrosstermEventResult>,
        starts_raw: bool,
    ) -> (InputDevice, SafeBool) {
        let raw_mode_flag: SafeBool = Arc::new(StdMutex::new(starts_raw));
        let device = InputDevice {
            resource: gen_input_stream(generator_vec),
            interactivity: TTYResult::IsInteractive,
            raw_mode: RawModeDriver::Simulated(raw_mode_flag.clone()),
        };
        (device, raw_mode_flag)
    }

    fn new_mock_non_interactive(generator_vec: Vec<CrosstermEventResult>) -> InputDevice {
        InputDevice {
            resource: gen_input_stream(generator_vec),
            interactivity: TTYResult::IsNotInteractive,
            raw_mode: RawModeDriver::Simulated(Arc::new(StdMutex::new(false))),
        }
    }
}
