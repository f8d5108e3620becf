//! Shared test-only doubles for replcell_core.

use crate::delivery::{Clipboard, Transport};
use crate::error::CellError;
use std::cell::RefCell;

/// Transport that records every write.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub(crate) sent: Vec<String>,
}

impl RecordingTransport {
    /// All writes concatenated, as the interpreter would see them.
    pub(crate) fn joined(&self) -> String {
        self.sent.concat()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, text: &str) -> Result<(), CellError> {
        self.sent.push(text.to_string());
        Ok(())
    }
}

/// Clipboard that records copies, or refuses them when `available` is false.
#[derive(Debug)]
pub(crate) struct FakeClipboard {
    pub(crate) available: bool,
    pub(crate) copies: RefCell<Vec<String>>,
}

impl FakeClipboard {
    pub(crate) fn available() -> Self {
        Self {
            available: true,
            copies: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn missing() -> Self {
        Self {
            available: false,
            copies: RefCell::new(Vec::new()),
        }
    }
}

impl Clipboard for FakeClipboard {
    fn copy(&self, text: &str) -> Result<(), CellError> {
        if !self.available {
            return Err(CellError::ClipboardUnavailable(
                "could not find any of: xclip, xsel".to_string(),
            ));
        }
        self.copies.borrow_mut().push(text.to_string());
        Ok(())
    }
}
