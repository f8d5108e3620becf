//! Concrete REPL transports.

use replcell_core::{CellError, Transport};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Types text into a tmux pane with `send-keys -l`.
pub(crate) struct TmuxTransport {
    target: String,
}

impl TmuxTransport {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub(crate) fn args<'a>(&'a self, text: &'a str) -> [&'a str; 6] {
        ["send-keys", "-t", self.target.as_str(), "-l", "--", text]
    }
}

impl Transport for TmuxTransport {
    fn send(&mut self, text: &str) -> Result<(), CellError> {
        if text.is_empty() {
            return Ok(());
        }
        let status = Command::new("tmux")
            .args(self.args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => CellError::Transport("tmux executable not found".to_string()),
                _ => CellError::Transport(format!("failed to run tmux: {}", err)),
            })?;
        if !status.success() {
            return Err(CellError::Transport(format!(
                "tmux send-keys to '{}' exited with {}",
                self.target, status
            )));
        }
        Ok(())
    }
}

/// Writes raw text to a stream, for editors that forward it themselves.
pub(crate) struct StreamTransport<W: Write> {
    writer: W,
}

impl<W: Write> StreamTransport<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for StreamTransport<W> {
    fn send(&mut self, text: &str) -> Result<(), CellError> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|err| CellError::Transport(format!("write failed: {}", err)))
    }
}
