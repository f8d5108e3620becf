//! Root crate facade for replcell.

pub use replcell_core::{
    cells, commands, config, constants, delivery, env, error, host, text, Boundaries,
    BoundarySource, CellConfig, CellError, CellRange, CellSession, Clipboard, ClipboardProgram,
    Cursor, DeliveryMode, Host, MemoryHost, Outcome, ProgramClipboard, TagMatcher, Transport,
};
