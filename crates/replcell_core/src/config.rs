//! Configuration loading from environment variables.

use crate::constants::{
    BRACKETED_PASTE_END, BRACKETED_PASTE_START, DEFAULT_CELL_COMMAND, DEFAULT_CHUNK_SIZE,
    DEFAULT_CLEAR_COMMAND, DEFAULT_CLOSE_COMMAND, DEFAULT_EMPTY_CELL_PLACEHOLDER,
    DEFAULT_INSERT_TAG, DEFAULT_RESTART_COMMAND, DEFAULT_RUN_COMMAND, DEFAULT_TAGS,
    DEFAULT_VALID_MARKS,
};
use crate::error::CellError;
use crate::text::{normalize_optional_nonempty, split_list};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Where cell boundaries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySource {
    /// Rows carrying one of the configured host marks.
    Marks,
    /// Rows whose text contains a configured tag.
    Tags,
}

impl FromStr for BoundarySource {
    type Err = CellError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "marks" => Ok(Self::Marks),
            "tags" => Ok(Self::Tags),
            other => Err(CellError::InvalidConfiguration(format!(
                "invalid value for delimit_cells_by: '{}' (expected 'marks' or 'tags')",
                other
            ))),
        }
    }
}

impl fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marks => f.write_str("marks"),
            Self::Tags => f.write_str("tags"),
        }
    }
}

/// How a cell payload reaches the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Copy to the system clipboard, then ask the interpreter to paste it.
    Clipboard,
    /// Stream the text through the transport inside paste brackets.
    Direct,
}

impl FromStr for DeliveryMode {
    type Err = CellError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "clipboard" => Ok(Self::Clipboard),
            "direct" => Ok(Self::Direct),
            other => Err(CellError::InvalidConfiguration(format!(
                "invalid value for delivery: '{}' (expected 'clipboard' or 'direct')",
                other
            ))),
        }
    }
}

/// Options for one command invocation.
///
/// Built once per invocation (usually through [`CellConfig::from_env`]) and
/// passed down by reference; nothing in the crate reads ambient state after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellConfig {
    pub delimit_cells_by: BoundarySource,
    pub valid_marks: String,
    pub tags: Vec<String>,
    pub regex: bool,
    pub include_first_line: bool,
    pub send_cell_headers: bool,
    pub send_ctrl_c: bool,
    pub send_ctrl_u: bool,
    pub delivery: DeliveryMode,
    pub preferred_clipboard: Option<String>,
    pub run_command: String,
    pub cell_command: String,
    pub clear_command: String,
    pub close_command: String,
    pub restart_command: String,
    pub insert_tag: String,
    pub empty_cell_placeholder: String,
    pub chunk_size: usize,
    pub paste_start: String,
    pub paste_end: String,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            delimit_cells_by: BoundarySource::Tags,
            valid_marks: DEFAULT_VALID_MARKS.to_string(),
            tags: DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect(),
            regex: false,
            include_first_line: true,
            send_cell_headers: false,
            send_ctrl_c: false,
            send_ctrl_u: false,
            delivery: DeliveryMode::Clipboard,
            preferred_clipboard: None,
            run_command: DEFAULT_RUN_COMMAND.to_string(),
            cell_command: DEFAULT_CELL_COMMAND.to_string(),
            clear_command: DEFAULT_CLEAR_COMMAND.to_string(),
            close_command: DEFAULT_CLOSE_COMMAND.to_string(),
            restart_command: DEFAULT_RESTART_COMMAND.to_string(),
            insert_tag: DEFAULT_INSERT_TAG.to_string(),
            empty_cell_placeholder: DEFAULT_EMPTY_CELL_PLACEHOLDER.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            paste_start: BRACKETED_PASTE_START.to_string(),
            paste_end: BRACKETED_PASTE_END.to_string(),
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn env_flag(name: &str, default: bool) -> Result<bool, CellError> {
    match env_value(name) {
        None => Ok(default),
        Some(raw) => parse_env_flag(&raw).ok_or_else(|| {
            CellError::InvalidConfiguration(format!("{} must be a boolean, got '{}'", name, raw))
        }),
    }
}

impl CellConfig {
    /// Load configuration from `REPLCELL_*` environment variables.
    ///
    /// Missing variables keep their defaults. Unrecognized enum values,
    /// unparsable numbers and non-boolean flags are reported rather than
    /// silently replaced.
    ///
    /// # Returns
    /// A validated [`CellConfig`].
    ///
    /// # Errors
    /// Returns [`CellError::InvalidConfiguration`] for any bad value.
    pub fn from_env() -> Result<Self, CellError> {
        Self::from_env_with(|_| {})
    }

    /// Load from the environment, apply `overrides`, then validate.
    ///
    /// Validation runs after the overrides so that, for example, tags given
    /// on a command line can stand in for an empty `REPLCELL_TAG`.
    ///
    /// # Errors
    /// Returns [`CellError::InvalidConfiguration`] for any bad value.
    pub fn from_env_with(overrides: impl FnOnce(&mut Self)) -> Result<Self, CellError> {
        let mut config = Self::default();

        if let Some(raw) = env_value("REPLCELL_DELIMIT_CELLS_BY") {
            config.delimit_cells_by = raw.parse()?;
        }
        if let Some(raw) = env_value("REPLCELL_VALID_MARKS") {
            config.valid_marks = raw.trim().to_string();
        }
        if let Some(raw) = env_value("REPLCELL_TAG") {
            config.tags = split_list(&raw);
        }
        config.regex = env_flag("REPLCELL_REGEX", config.regex)?;
        config.include_first_line =
            env_flag("REPLCELL_INCLUDE_FIRST_LINE", config.include_first_line)?;
        config.send_cell_headers =
            env_flag("REPLCELL_SEND_CELL_HEADERS", config.send_cell_headers)?;
        config.send_ctrl_c = env_flag("REPLCELL_SEND_CTRL_C", config.send_ctrl_c)?;
        config.send_ctrl_u = env_flag("REPLCELL_SEND_CTRL_U", config.send_ctrl_u)?;
        if let Some(raw) = env_value("REPLCELL_DELIVERY") {
            config.delivery = raw.parse()?;
        }
        config.preferred_clipboard =
            normalize_optional_nonempty(env_value("REPLCELL_PREFER_CLIPBOARD"));

        let templates = [
            ("REPLCELL_RUN_COMMAND", &mut config.run_command),
            ("REPLCELL_CELL_COMMAND", &mut config.cell_command),
            ("REPLCELL_CLEAR_COMMAND", &mut config.clear_command),
            ("REPLCELL_CLOSE_COMMAND", &mut config.close_command),
            ("REPLCELL_RESTART_COMMAND", &mut config.restart_command),
            ("REPLCELL_INSERT_TAG", &mut config.insert_tag),
            ("REPLCELL_EMPTY_CELL_PLACEHOLDER", &mut config.empty_cell_placeholder),
        ];
        for (name, slot) in templates {
            if let Some(raw) = env_value(name) {
                *slot = raw;
            }
        }

        if let Some(raw) = env_value("REPLCELL_CHUNK_SIZE") {
            config.chunk_size = raw.trim().parse().map_err(|_| {
                CellError::InvalidConfiguration(format!(
                    "REPLCELL_CHUNK_SIZE must be a positive integer, got '{}'",
                    raw
                ))
            })?;
        }

        overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints after all overrides were applied.
    ///
    /// # Errors
    /// Returns [`CellError::InvalidConfiguration`] when the active boundary
    /// source has nothing to look for or `chunk_size` is zero.
    pub fn validate(&self) -> Result<(), CellError> {
        if self.chunk_size == 0 {
            return Err(CellError::InvalidConfiguration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        match self.delimit_cells_by {
            BoundarySource::Tags if self.tags.iter().all(|tag| tag.is_empty()) => Err(
                CellError::InvalidConfiguration("no cell tags configured".to_string()),
            ),
            BoundarySource::Marks if self.valid_marks.trim().is_empty() => Err(
                CellError::InvalidConfiguration("no valid marks configured".to_string()),
            ),
            _ => Ok(()),
        }
    }
}
