//! Payload extraction and delivery to the interpreter.
//!
//! Delivery never inspects the interpreter's reply: every transport write is
//! fire-and-forget.

/// External clipboard programs tried in order.
pub mod clipboard;

use crate::cells::{CellRange, TagMatcher};
use crate::config::{CellConfig, DeliveryMode};
use crate::constants::{CTRL_C, CTRL_U};
use crate::error::CellError;

/// Forwards text into a running interpreter session.
pub trait Transport {
    /// Send `text` verbatim. Control characters are passed through.
    ///
    /// # Errors
    /// Returns [`CellError::Transport`] when the session cannot be reached.
    fn send(&mut self, text: &str) -> Result<(), CellError>;
}

/// Places text on the system clipboard.
pub trait Clipboard {
    /// # Errors
    /// Returns [`CellError::ClipboardUnavailable`] when no clipboard program
    /// could take the text.
    fn copy(&self, text: &str) -> Result<(), CellError>;
}

/// Join the lines of `range`, substituting the buffer end for an open range.
///
/// Rows outside the buffer are clamped, so a stale range yields an empty
/// string rather than a panic.
pub fn extract_cell<S: AsRef<str>>(lines: &[S], range: CellRange) -> String {
    let first = range.start.saturating_sub(1).min(lines.len());
    let last = range.end_or(lines.len()).min(lines.len()).max(first);
    lines[first..last]
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Text to deliver for `range`, or `None` for an empty cell.
///
/// With a `header` matcher, a leading tag line is dropped from the payload.
pub fn cell_payload<S: AsRef<str>>(
    lines: &[S],
    range: CellRange,
    header: Option<&TagMatcher>,
) -> Option<String> {
    let mut range = range;
    let header_line = lines.get(range.start.saturating_sub(1)).map(AsRef::as_ref);
    if let (Some(matcher), Some(line)) = (header, header_line) {
        if matcher.is_match(line) {
            if range.end == Some(range.start) {
                return None;
            }
            range.start += 1;
        }
    }
    let payload = extract_cell(lines, range);
    if payload.trim().is_empty() {
        None
    } else {
        Some(payload)
    }
}

/// Split `text` into chunks of whole lines of at most `max_bytes` each.
///
/// A single line longer than `max_bytes` becomes its own chunk. The chunks
/// concatenate back to `text` exactly.
pub fn chunk_lines(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in text.split_inclusive('\n') {
        if !current.is_empty() && current.len() + line.len() > max_bytes {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Send the configured interrupt / line-clear prefixes.
///
/// # Errors
/// Propagates transport failures.
pub fn send_prefixes(transport: &mut dyn Transport, config: &CellConfig) -> Result<(), CellError> {
    if config.send_ctrl_c {
        transport.send(CTRL_C)?;
    }
    if config.send_ctrl_u {
        transport.send(CTRL_U)?;
    }
    Ok(())
}

/// Send one interpreter command followed by a newline.
///
/// # Errors
/// Propagates transport failures.
pub fn send_command(
    transport: &mut dyn Transport,
    config: &CellConfig,
    command: &str,
) -> Result<(), CellError> {
    send_prefixes(transport, config)?;
    transport.send(command)?;
    transport.send("\n")
}

/// Deliver a cell payload using the configured [`DeliveryMode`].
///
/// In clipboard mode nothing reaches the transport unless the copy
/// succeeded.
///
/// # Errors
/// Returns [`CellError::ClipboardUnavailable`] or transport errors.
pub fn deliver_cell(
    transport: &mut dyn Transport,
    clipboard: &dyn Clipboard,
    config: &CellConfig,
    payload: &str,
) -> Result<(), CellError> {
    match config.delivery {
        DeliveryMode::Clipboard => {
            clipboard.copy(payload)?;
            send_command(transport, config, &config.cell_command)?;
        }
        DeliveryMode::Direct => {
            send_prefixes(transport, config)?;
            transport.send(&config.paste_start)?;
            for chunk in chunk_lines(payload, config.chunk_size) {
                transport.send(&chunk)?;
            }
            transport.send(&config.paste_end)?;
            transport.send("\n")?;
        }
    }
    tracing::info!(
        bytes = payload.len(),
        mode = ?config.delivery,
        "delivered cell"
    );
    Ok(())
}
