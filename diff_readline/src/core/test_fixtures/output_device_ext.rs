// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OutputDevice, StdMutex, StdoutMock, WidthSource};
use std::sync::Arc;

pub trait OutputDeviceExt {
    /// An output device `width` columns wide that writes into the returned
    /// [`StdoutMock`].
    fn new_mock(width: u16) -> (OutputDevice, StdoutMock);
}

impl OutputDeviceExt for OutputDevice {
    fn new_mock(width: u16) -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
            width_source: WidthSource::Fixed(width),
            is_mock: true,
        };
        (this, stdout_mock)
    }
}

#[cfg(test)]
mod tests {
    use super::OutputDeviceExt;
    use crate::OutputDevice;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_mock_output_device() {
        let (device, mock) = OutputDevice::new_mock(20);
        device.lock().unwrap().write_all(b"Hello, world!\n").unwrap();
        assert_eq!(
            mock.get_copy_of_buffer_as_string_strip_ansi(),
            "Hello, world!\n"
        );
        assert!(device.is_mock);
        assert_eq!(device.width(), 20);
    }
}
