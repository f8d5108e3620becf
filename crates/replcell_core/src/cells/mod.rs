//! Cell boundaries and range resolution.
//!
//! A cell runs from one boundary row (inclusive) to the row before the next
//! boundary, or to the end of the buffer when no boundary follows.

mod discovery;
#[cfg(test)]
mod tests;

pub use discovery::{
    discover_boundaries, resolve_boundaries, rows_with_marks, rows_with_tags, TagMatcher,
};

use serde::Serialize;

/// Row range of one cell. `end == None` means the cell runs to buffer end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl CellRange {
    pub const fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Last row of the cell, substituting `last_row` for an open end.
    pub fn end_or(&self, last_row: usize) -> usize {
        self.end.unwrap_or(last_row)
    }
}

/// Canonical boundary list: deduplicated, strictly ascending, no row 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Boundaries(Vec<usize>);

impl Boundaries {
    /// Deduplicate and sort `raw`, adding row 1 when `include_first_line`.
    ///
    /// Row 0 is never a boundary and is dropped.
    pub fn normalize<I>(raw: I, include_first_line: bool) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut rows: Vec<usize> = raw.into_iter().filter(|row| *row > 0).collect();
        if include_first_line {
            rows.push(1);
        }
        rows.sort_unstable();
        rows.dedup();
        Self(rows)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve the cell containing `row`.
    ///
    /// A row sitting on a boundary belongs to the cell that boundary opens.
    ///
    /// # Returns
    /// `None` when no boundary is at or above `row`.
    pub fn current_cell(&self, row: usize) -> Option<CellRange> {
        let mut start = None;
        let mut next_start = None;
        for &boundary in &self.0 {
            if boundary <= row {
                start = Some(boundary);
            } else {
                next_start = Some(boundary);
                break;
            }
        }
        start.map(|start| CellRange::new(start, next_start.map(|next| next - 1)))
    }

    /// Start of the next cell, or `row` itself when there is none.
    pub fn next_cell(&self, row: usize) -> usize {
        self.0
            .iter()
            .copied()
            .find(|boundary| *boundary > row)
            .unwrap_or(row)
    }

    /// Start of the previous cell, or `row` itself when there is none.
    ///
    /// Strictly backward: on a header row this returns the prior header, not
    /// the current one.
    pub fn prev_cell(&self, row: usize) -> usize {
        self.0
            .iter()
            .copied()
            .take_while(|boundary| *boundary < row)
            .last()
            .unwrap_or(row)
    }

    /// Every cell of a buffer with `line_count` lines, ordered by start.
    ///
    /// Boundaries past the end of the buffer (stale marks) are ignored, and
    /// the last cell is always open-ended.
    pub fn cells(&self, line_count: usize) -> Vec<CellRange> {
        let starts: Vec<usize> = self
            .0
            .iter()
            .copied()
            .filter(|row| *row <= line_count.max(1))
            .collect();
        starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                CellRange::new(start, starts.get(index + 1).map(|next| next - 1))
            })
            .collect()
    }
}

impl From<Boundaries> for Vec<usize> {
    fn from(value: Boundaries) -> Self {
        value.0
    }
}
