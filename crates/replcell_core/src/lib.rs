//! Core library for replcell (cell resolution, configuration, delivery).

/// Cell boundary discovery and range resolution.
pub mod cells;
/// Editor-facing commands built on top of cell resolution.
pub mod commands;
/// Configuration loading and defaults.
pub mod config;
/// Shared defaults and control sequences.
pub mod constants;
/// Payload extraction and delivery to the REPL transport or clipboard.
pub mod delivery;
/// Process-global environment helpers.
pub mod env;
/// Error types shared by every command.
pub mod error;
/// Host editor abstraction and an in-memory stand-in.
pub mod host;
/// Small string helpers for configuration values.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use cells::{Boundaries, CellRange, TagMatcher};
pub use commands::{CellSession, Outcome};
pub use config::{BoundarySource, CellConfig, DeliveryMode};
pub use delivery::clipboard::{ClipboardProgram, ProgramClipboard};
pub use delivery::{Clipboard, Transport};
pub use error::CellError;
pub use host::{Cursor, Host, MemoryHost};
