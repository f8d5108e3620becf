//! Shared defaults and control sequences used across replcell crates.

/// Mark identifiers consulted in marks mode.
pub const DEFAULT_VALID_MARKS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Tags recognized as cell headers in tags mode.
pub const DEFAULT_TAGS: &[&str] = &["# %%", "#%%", "# <codecell>", "##"];

/// Header text inserted by the insert-above/below commands.
pub const DEFAULT_INSERT_TAG: &str = "## ";

/// Command template for running the whole file.
pub const DEFAULT_RUN_COMMAND: &str = "%run {options} \"{filepath}\"";
/// Command that pastes the clipboard into the interpreter.
pub const DEFAULT_CELL_COMMAND: &str = "%paste -q";
/// Command that clears the interpreter screen.
pub const DEFAULT_CLEAR_COMMAND: &str = "%clear";
/// Command that closes every open figure window.
pub const DEFAULT_CLOSE_COMMAND: &str = "plt.close('all')";
/// Command used to start a fresh interpreter after a restart.
pub const DEFAULT_RESTART_COMMAND: &str = "ipython";

/// Sent instead of an empty payload.
pub const DEFAULT_EMPTY_CELL_PLACEHOLDER: &str = "# empty cell";

/// Upper bound in bytes for one direct-mode transport write.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Bracketed-paste start sequence.
pub const BRACKETED_PASTE_START: &str = "\x1b[200~";
/// Bracketed-paste end sequence.
pub const BRACKETED_PASTE_END: &str = "\x1b[201~";

/// Interrupt (Ctrl-C).
pub const CTRL_C: &str = "\x03";
/// End of input (Ctrl-D).
pub const CTRL_D: &str = "\x04";
/// History previous (Ctrl-P).
pub const CTRL_P: &str = "\x10";
/// Kill line (Ctrl-U).
pub const CTRL_U: &str = "\x15";

/// Row reported by hosts for a mark that was never placed.
pub const UNSET_MARK_ROW: usize = 0;
