// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::Event;
use futures_core::Stream;
use std::{io, pin::Pin, sync::Arc};

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn std::io::Write + Send;
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type SafeBool = Arc<StdMutex<bool>>;

pub type CrosstermEventResult = io::Result<Event>;

pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;

/// Turn a poisoned lock into an [`io::Error`] so callers can propagate it with `?`.
pub fn lock_poisoned_error<T>(_poison: std::sync::PoisonError<T>) -> io::Error {
    io::Error::other("lock poisoned by a panicking holder")
}
