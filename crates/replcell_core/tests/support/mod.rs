//! Shared integration-test doubles.

use replcell_core::{CellError, Clipboard, Transport};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) sent: Vec<String>,
}

impl Transport for Recorder {
    fn send(&mut self, text: &str) -> Result<(), CellError> {
        self.sent.push(text.to_string());
        Ok(())
    }
}

/// Transport that refuses every write, like a tmux pane that went away.
pub(crate) struct DeadPane;

impl Transport for DeadPane {
    fn send(&mut self, _text: &str) -> Result<(), CellError> {
        Err(CellError::Transport("pane not found".to_string()))
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryClipboard {
    pub(crate) contents: RefCell<Option<String>>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<(), CellError> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
