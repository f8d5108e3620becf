//! Boundary discovery from host marks or tagged lines.

use super::Boundaries;
use crate::config::{BoundarySource, CellConfig};
use crate::constants::UNSET_MARK_ROW;
use crate::error::CellError;
use crate::host::Host;
use regex::Regex;

/// Decides whether a line is a cell header.
#[derive(Debug, Clone)]
pub enum TagMatcher {
    /// Substring match against any tag.
    Literal(Vec<String>),
    /// Substring match, or a regex match anywhere in the line.
    Pattern(Vec<(String, Regex)>),
}

impl TagMatcher {
    /// Build a matcher from configured tags, dropping empty ones.
    ///
    /// # Errors
    /// Returns [`CellError::InvalidConfiguration`] when no non-empty tag is
    /// left or a tag does not compile as a regex in regex mode.
    pub fn new(tags: &[String], regex: bool) -> Result<Self, CellError> {
        let tags: Vec<String> = tags.iter().filter(|tag| !tag.is_empty()).cloned().collect();
        if tags.is_empty() {
            return Err(CellError::InvalidConfiguration(
                "no cell tags configured".to_string(),
            ));
        }
        if !regex {
            return Ok(Self::Literal(tags));
        }
        let patterns = tags
            .into_iter()
            .map(|tag| Regex::new(&tag).map(|pattern| (tag, pattern)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Pattern(patterns))
    }

    /// Matcher for the tags in `config`.
    ///
    /// # Errors
    /// Same as [`TagMatcher::new`].
    pub fn from_config(config: &CellConfig) -> Result<Self, CellError> {
        Self::new(&config.tags, config.regex)
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Literal(tags) => tags.iter().any(|tag| line.contains(tag.as_str())),
            Self::Pattern(patterns) => patterns
                .iter()
                .any(|(tag, pattern)| line.contains(tag.as_str()) || pattern.is_match(line)),
        }
    }
}

/// Rows (1-indexed) of every line the matcher accepts.
pub fn rows_with_tags<S: AsRef<str>>(lines: &[S], matcher: &TagMatcher) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher.is_match(line.as_ref()))
        .map(|(index, _)| index + 1)
        .collect()
}

/// Rows of every placed mark among `valid_marks`.
pub fn rows_with_marks(host: &dyn Host, valid_marks: &str) -> Vec<usize> {
    valid_marks
        .chars()
        .filter(|id| !id.is_whitespace())
        .filter_map(|id| host.mark(id))
        .map(|position| position.row)
        .filter(|row| *row != UNSET_MARK_ROW)
        .collect()
}

/// Unnormalized boundary rows for the configured source.
///
/// # Errors
/// Returns [`CellError::InvalidConfiguration`] when the tag set is unusable.
pub fn discover_boundaries(host: &dyn Host, config: &CellConfig) -> Result<Vec<usize>, CellError> {
    let rows = match config.delimit_cells_by {
        BoundarySource::Marks => rows_with_marks(host, &config.valid_marks),
        BoundarySource::Tags => {
            let matcher = TagMatcher::from_config(config)?;
            rows_with_tags(host.lines(), &matcher)
        }
    };
    tracing::debug!(
        source = %config.delimit_cells_by,
        count = rows.len(),
        "discovered cell boundaries"
    );
    Ok(rows)
}

/// Discover and normalize boundaries in one step.
///
/// # Errors
/// Same as [`discover_boundaries`].
pub fn resolve_boundaries(host: &dyn Host, config: &CellConfig) -> Result<Boundaries, CellError> {
    let raw = discover_boundaries(host, config)?;
    Ok(Boundaries::normalize(raw, config.include_first_line))
}
