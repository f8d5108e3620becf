//! Editor commands: execute, navigate, run, insert.
//!
//! Each command resolves boundaries fresh from the host, performs at most
//! one logical action, and reports an [`Outcome`]. Errors end the command;
//! nothing is retried.


use crate::cells::{resolve_boundaries, Boundaries, CellRange, TagMatcher};
use crate::config::{BoundarySource, CellConfig};
use crate::constants::{CTRL_D, CTRL_P};
use crate::delivery::{
    cell_payload, deliver_cell, send_command, send_prefixes, Clipboard, Transport,
};
use crate::error::CellError;
use crate::host::Host;
use crate::text::render_run_command;
use std::fmt;

/// User-visible result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text went to the interpreter.
    Sent(String),
    /// Cursor moved to `row`.
    Moved { row: usize },
    /// A header line was inserted at `row`.
    Inserted { row: usize },
    /// Nothing to do; the message says why.
    NoOp(String),
    /// Cell listing.
    Cells(Vec<CellRange>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent(what) => write!(f, "sent {}", what),
            Self::Moved { row } => write!(f, "moved to row {}", row),
            Self::Inserted { row } => write!(f, "inserted cell header at row {}", row),
            Self::NoOp(reason) => f.write_str(reason),
            Self::Cells(cells) => write!(f, "{} cells", cells.len()),
        }
    }
}

/// Collaborators for one command invocation.
pub struct CellSession<'a> {
    host: &'a mut dyn Host,
    transport: &'a mut dyn Transport,
    clipboard: &'a dyn Clipboard,
    config: &'a CellConfig,
}

impl<'a> CellSession<'a> {
    pub fn new(
        host: &'a mut dyn Host,
        transport: &'a mut dyn Transport,
        clipboard: &'a dyn Clipboard,
        config: &'a CellConfig,
    ) -> Self {
        Self {
            host,
            transport,
            clipboard,
            config,
        }
    }

    fn boundaries(&self) -> Result<Boundaries, CellError> {
        resolve_boundaries(&*self.host, self.config)
    }

    fn current_cell(&self) -> Result<Option<CellRange>, CellError> {
        let row = self.host.cursor().row;
        let cell = self.boundaries()?.current_cell(row);
        if let Some(range) = cell {
            tracing::debug!(row, start = range.start, end = ?range.end, "resolved current cell");
        }
        Ok(cell)
    }

    /// Send the cell under the cursor.
    ///
    /// An empty cell sends the configured placeholder instead.
    ///
    /// # Errors
    /// Configuration, clipboard and transport errors.
    pub fn execute_cell(&mut self) -> Result<Outcome, CellError> {
        let Some(range) = self.current_cell()? else {
            return Ok(Outcome::NoOp("no cell at the cursor".to_string()));
        };

        let header = if !self.config.send_cell_headers
            && self.config.delimit_cells_by == BoundarySource::Tags
        {
            Some(TagMatcher::from_config(self.config)?)
        } else {
            None
        };

        match cell_payload(self.host.lines(), range, header.as_ref()) {
            Some(payload) => {
                deliver_cell(self.transport, self.clipboard, self.config, &payload)?;
                Ok(Outcome::Sent(describe_range(range)))
            }
            None => {
                send_command(self.transport, self.config, &self.config.empty_cell_placeholder)?;
                Ok(Outcome::Sent("empty cell placeholder".to_string()))
            }
        }
    }

    /// Send the cell under the cursor, then jump to the next cell.
    ///
    /// # Errors
    /// Same as [`CellSession::execute_cell`] plus host cursor failures.
    pub fn execute_cell_and_jump(&mut self) -> Result<Outcome, CellError> {
        let outcome = self.execute_cell()?;
        self.jump_next_cell()?;
        Ok(outcome)
    }

    /// Move the cursor to the start of the next cell.
    ///
    /// # Errors
    /// Configuration and host cursor failures.
    pub fn jump_next_cell(&mut self) -> Result<Outcome, CellError> {
        let row = self.host.cursor().row;
        let target = self.boundaries()?.next_cell(row);
        self.move_to(row, target, "already in the last cell")
    }

    /// Move the cursor to the start of the previous cell.
    ///
    /// On a header row this goes to the header before it.
    ///
    /// # Errors
    /// Configuration and host cursor failures.
    pub fn jump_prev_cell(&mut self) -> Result<Outcome, CellError> {
        let row = self.host.cursor().row;
        let target = self.boundaries()?.prev_cell(row);
        self.move_to(row, target, "already in the first cell")
    }

    fn move_to(&mut self, row: usize, target: usize, noop: &str) -> Result<Outcome, CellError> {
        if target == row {
            return Ok(Outcome::NoOp(noop.to_string()));
        }
        self.host.set_cursor(target, 0)?;
        Ok(Outcome::Moved { row: target })
    }

    /// Run the whole file with the configured run template.
    ///
    /// # Errors
    /// Transport errors.
    pub fn run(&mut self, options: &[String]) -> Result<Outcome, CellError> {
        let command = render_run_command(
            &self.config.run_command,
            &options.join(" "),
            self.host.name(),
        );
        send_command(self.transport, self.config, &command)?;
        Ok(Outcome::Sent(command))
    }

    /// Clear the interpreter screen.
    ///
    /// # Errors
    /// Transport errors.
    pub fn clear(&mut self) -> Result<Outcome, CellError> {
        let config = self.config;
        self.send_configured(&config.clear_command)
    }

    /// Close all figure windows.
    ///
    /// # Errors
    /// Transport errors.
    pub fn close_all(&mut self) -> Result<Outcome, CellError> {
        let config = self.config;
        self.send_configured(&config.close_command)
    }

    fn send_configured(&mut self, command: &str) -> Result<Outcome, CellError> {
        send_command(self.transport, self.config, command)?;
        Ok(Outcome::Sent(command.to_string()))
    }

    /// Recall and run the interpreter's previous command.
    ///
    /// # Errors
    /// Transport errors.
    pub fn previous_command(&mut self) -> Result<Outcome, CellError> {
        send_prefixes(self.transport, self.config)?;
        self.transport.send(CTRL_P)?;
        self.transport.send("\n")?;
        Ok(Outcome::Sent("previous command".to_string()))
    }

    /// Exit the interpreter and start it again.
    ///
    /// # Errors
    /// Transport errors.
    pub fn restart(&mut self) -> Result<Outcome, CellError> {
        send_prefixes(self.transport, self.config)?;
        self.transport.send(CTRL_D)?;
        self.transport.send("y\n")?;
        let restart_command = self.config.restart_command.trim();
        if !restart_command.is_empty() {
            self.transport.send(restart_command)?;
            self.transport.send("\n")?;
        }
        Ok(Outcome::Sent("restart".to_string()))
    }

    /// Insert a cell header above the current cell.
    ///
    /// # Errors
    /// Configuration and host insertion failures.
    pub fn insert_cell_above(&mut self) -> Result<Outcome, CellError> {
        let row = match self.current_cell()? {
            Some(range) => range.start,
            None => self.host.cursor().row,
        };
        self.insert_header(row)
    }

    /// Insert a cell header below the current cell.
    ///
    /// # Errors
    /// Configuration and host insertion failures.
    pub fn insert_cell_below(&mut self) -> Result<Outcome, CellError> {
        let line_count = self.host.lines().len();
        let row = match self.current_cell()? {
            Some(range) => range.end_or(line_count) + 1,
            None => self.host.cursor().row + 1,
        };
        self.insert_header(row.min(line_count + 1))
    }

    fn insert_header(&mut self, row: usize) -> Result<Outcome, CellError> {
        self.host.insert_line(row, &self.config.insert_tag)?;
        self.host.set_cursor(row, 0)?;
        tracing::debug!(row, "inserted cell header");
        Ok(Outcome::Inserted { row })
    }

    /// Every cell of the buffer.
    ///
    /// # Errors
    /// Configuration errors.
    pub fn list_cells(&self) -> Result<Outcome, CellError> {
        let cells = self.boundaries()?.cells(self.host.lines().len());
        Ok(Outcome::Cells(cells))
    }
}

fn describe_range(range: CellRange) -> String {
    match range.end {
        Some(end) => format!("cell {}-{}", range.start, end),
        None => format!("cell {}-end", range.start),
    }
}
