// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermEventResult, PinnedInputStream};
use async_stream::stream;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// The main constructors are:
/// - [`super::InputDeviceExt::new_mock()`]
/// - [`super::InputDeviceExt::new_mock_non_interactive()`]
pub fn gen_input_stream<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

/// One key press event per character of `text`.
#[must_use]
pub fn key_events_for_text(text: &str) -> Vec<CrosstermEventResult> {
    text.chars()
        .map(|ch| Ok(Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))))
        .collect()
}

#[must_use]
pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEventResult {
    Ok(Event::Key(KeyEvent::new(code, modifiers)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_gen_input_stream() {
        let mut input_stream = gen_input_stream(vec![1, 2, 3]);
        for expected in 1..=3 {
            assert_eq!(input_stream.next().await, Some(expected));
        }
        assert_eq!(input_stream.next().await, None);
    }

    #[test]
    fn test_key_events_for_text() {
        let events = key_events_for_text("hi");
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            Ok(Event::Key(KeyEvent { code: KeyCode::Char('h'), .. }))
        ));
    }
}
