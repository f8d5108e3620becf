//! File-backed host: the buffer is a file on disk, the cursor comes from flags.

use replcell_core::host::{Cursor, Host, MemoryHost};
use replcell_core::CellError;
use std::fs;
use std::path::{Path, PathBuf};

/// A [`Host`] over a file, written back only when lines were inserted.
pub(crate) struct FileHost {
    path: PathBuf,
    buffer: MemoryHost,
    line_ending: &'static str,
    trailing_newline: bool,
    dirty: bool,
}

impl FileHost {
    /// Read `path` and place the cursor at `cursor`.
    ///
    /// # Errors
    /// Returns [`CellError::Io`] when the file cannot be read.
    pub(crate) fn open(path: &Path, cursor: Cursor) -> Result<Self, CellError> {
        let content = fs::read_to_string(path)?;
        let name = path.to_string_lossy().to_string();
        let buffer = MemoryHost::new(content.lines())
            .with_name(name)
            .with_cursor(cursor.row, cursor.col);
        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        Ok(Self {
            path: path.to_path_buf(),
            buffer,
            line_ending,
            trailing_newline: content.ends_with('\n'),
            dirty: false,
        })
    }

    /// Attach marks given on the command line.
    pub(crate) fn with_marks(mut self, marks: &[(char, usize)]) -> Self {
        for &(id, row) in marks {
            self.buffer = self.buffer.with_mark(id, row, 0);
        }
        self
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the buffer back to its file, keeping the line ending it was read
    /// with.
    ///
    /// # Errors
    /// Returns [`CellError::Io`] when the write fails.
    pub(crate) fn persist(&mut self) -> Result<(), CellError> {
        let mut content = self.buffer.lines().join(self.line_ending);
        if self.trailing_newline || content.is_empty() {
            content.push_str(self.line_ending);
        }
        fs::write(&self.path, content)?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "wrote buffer");
        Ok(())
    }
}

impl Host for FileHost {
    fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    fn cursor(&self) -> Cursor {
        self.buffer.cursor()
    }

    fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), CellError> {
        self.buffer.set_cursor(row, col)
    }

    fn mark(&self, id: char) -> Option<Cursor> {
        self.buffer.mark(id)
    }

    fn insert_line(&mut self, row: usize, text: &str) -> Result<(), CellError> {
        self.buffer.insert_line(row, text)?;
        self.dirty = true;
        Ok(())
    }

    fn name(&self) -> &str {
        self.buffer.name()
    }
}
