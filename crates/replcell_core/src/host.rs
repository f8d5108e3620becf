//! Host editor abstraction.
//!
//! The resolution core only talks to the editor through [`Host`]. Rows are
//! 1-indexed everywhere, matching what editors show to users.

use crate::error::CellError;
use std::collections::HashMap;

/// A cursor or mark position (1-indexed row, 0-indexed column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Read/query interface to the editor buffer that owns the cell text.
pub trait Host {
    /// Full buffer content at call time.
    fn lines(&self) -> &[String];

    /// Current cursor position.
    fn cursor(&self) -> Cursor;

    /// Move the cursor.
    ///
    /// # Errors
    /// Returns [`CellError::HostOperationFailed`] when `row` is outside the
    /// buffer.
    fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), CellError>;

    /// Position of mark `id`, or `None` when the mark is not placed.
    fn mark(&self, id: char) -> Option<Cursor>;

    /// Insert `text` so that it becomes line `row`, shifting later lines down.
    ///
    /// # Errors
    /// Returns [`CellError::HostOperationFailed`] when `row` is not in
    /// `1..=line_count + 1`.
    fn insert_line(&mut self, row: usize, text: &str) -> Result<(), CellError>;

    /// Buffer name (usually the file path).
    fn name(&self) -> &str;
}

/// Validate a cursor target against the buffer size.
///
/// # Errors
/// Returns [`CellError::HostOperationFailed`] for row 0 or rows past the end.
pub fn check_cursor_row(row: usize, line_count: usize) -> Result<(), CellError> {
    if row == 0 || row > line_count {
        return Err(CellError::HostOperationFailed(format!(
            "cursor row {} is outside the buffer (1..={})",
            row, line_count
        )));
    }
    Ok(())
}

/// Validate an insertion row against the buffer size.
///
/// # Errors
/// Returns [`CellError::HostOperationFailed`] for row 0 or rows more than one
/// past the end.
pub fn check_insert_row(row: usize, line_count: usize) -> Result<(), CellError> {
    if row == 0 || row > line_count + 1 {
        return Err(CellError::HostOperationFailed(format!(
            "cannot insert at row {} (buffer has {} lines)",
            row, line_count
        )));
    }
    Ok(())
}

/// In-memory buffer used by tests and by file-backed hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHost {
    name: String,
    lines: Vec<String>,
    cursor: Cursor,
    marks: HashMap<char, Cursor>,
}

impl MemoryHost {
    /// Create a buffer from `lines` with the cursor on row 1.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: String::new(),
            lines: lines.into_iter().map(Into::into).collect(),
            cursor: Cursor::new(1, 0),
            marks: HashMap::new(),
        }
    }

    /// Set the buffer name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Place the cursor without bounds checks.
    ///
    /// Editors may report a cursor past the last line of a buffer that is
    /// being edited, so construction does not reject it.
    pub fn with_cursor(mut self, row: usize, col: usize) -> Self {
        self.cursor = Cursor::new(row, col);
        self
    }

    /// Place mark `id` at `(row, col)`.
    pub fn with_mark(mut self, id: char, row: usize, col: usize) -> Self {
        self.marks.insert(id, Cursor::new(row, col));
        self
    }
}

impl Host for MemoryHost {
    fn lines(&self) -> &[String] {
        &self.lines
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), CellError> {
        check_cursor_row(row, self.lines.len())?;
        self.cursor = Cursor::new(row, col);
        Ok(())
    }

    fn mark(&self, id: char) -> Option<Cursor> {
        self.marks.get(&id).copied()
    }

    fn insert_line(&mut self, row: usize, text: &str) -> Result<(), CellError> {
        check_insert_row(row, self.lines.len())?;
        self.lines.insert(row - 1, text.to_string());
        for mark in self.marks.values_mut() {
            if mark.row >= row {
                mark.row += 1;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
