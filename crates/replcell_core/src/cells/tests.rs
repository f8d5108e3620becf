use super::{
    discover_boundaries, resolve_boundaries, rows_with_marks, rows_with_tags, Boundaries,
    CellRange, TagMatcher,
};
use crate::config::{BoundarySource, CellConfig};
use crate::error::CellError;
use crate::host::MemoryHost;

fn sample() -> Boundaries {
    Boundaries::normalize([1, 4, 8, 15, 20], true)
}

fn literal(tag: &str) -> TagMatcher {
    TagMatcher::new(&[tag.to_string()], false).expect("matcher")
}

#[test]
fn current_cell_inside_a_middle_cell() {
    let boundaries = sample();
    for row in [8, 10, 14] {
        assert_eq!(
            boundaries.current_cell(row),
            Some(CellRange::new(8, Some(14))),
            "row {}",
            row
        );
    }
}

#[test]
fn current_cell_in_first_cell() {
    let boundaries = sample();
    assert_eq!(boundaries.current_cell(1), Some(CellRange::new(1, Some(3))));
    assert_eq!(boundaries.current_cell(2), Some(CellRange::new(1, Some(3))));
}

#[test]
fn current_cell_in_last_cell_is_open_ended() {
    let boundaries = sample();
    assert_eq!(boundaries.current_cell(20), Some(CellRange::new(20, None)));
    assert_eq!(boundaries.current_cell(99), Some(CellRange::new(20, None)));
}

#[test]
fn current_cell_before_first_boundary_is_none() {
    let boundaries = Boundaries::normalize([5, 9], false);
    assert_eq!(boundaries.current_cell(3), None);
    assert_eq!(boundaries.current_cell(5), Some(CellRange::new(5, Some(8))));
    assert_eq!(Boundaries::default().current_cell(1), None);
}

#[test]
fn next_cell_moves_forward_or_stays() {
    let boundaries = sample();
    assert_eq!(boundaries.next_cell(8), 15);
    assert_eq!(boundaries.next_cell(12), 15);
    assert_eq!(boundaries.next_cell(14), 15);
    assert_eq!(boundaries.next_cell(20), 20);
    assert_eq!(boundaries.next_cell(42), 42);
}

#[test]
fn prev_cell_is_strictly_backward() {
    let boundaries = sample();
    assert_eq!(boundaries.prev_cell(8), 4);
    assert_eq!(boundaries.prev_cell(10), 8);
    assert_eq!(boundaries.prev_cell(14), 8);
    assert_eq!(boundaries.prev_cell(1), 1);
}

#[test]
fn next_then_prev_returns_to_cell_start() {
    let boundaries = sample();
    for row in 4..30 {
        let start = boundaries.current_cell(row).expect("cell").start;
        let next = boundaries.next_cell(start);
        if next != start {
            assert_eq!(boundaries.prev_cell(next), start, "row {}", row);
        }
    }
}

#[test]
fn current_cell_start_is_greatest_boundary_at_or_before_row() {
    let boundaries = sample();
    for row in 1..40 {
        let cell = boundaries.current_cell(row).expect("cell");
        let expected = boundaries
            .as_slice()
            .iter()
            .copied()
            .filter(|b| *b <= row)
            .max()
            .expect("boundary");
        assert_eq!(cell.start, expected);
        if let Some(end) = cell.end {
            assert!(boundaries.as_slice().contains(&(end + 1)));
            assert!(end + 1 > row);
            assert!(cell.start <= end);
        }
    }
}

#[test]
fn cells_partition_the_buffer() {
    let boundaries = sample();
    let line_count = 25;
    let cells = boundaries.cells(line_count);
    assert_eq!(cells.len(), 5);

    let mut covered = Vec::new();
    for cell in &cells {
        covered.extend(cell.start..=cell.end_or(line_count));
    }
    assert_eq!(covered, (1..=line_count).collect::<Vec<_>>());
    assert_eq!(cells.last(), Some(&CellRange::new(20, None)));
}

#[test]
fn cells_ignore_boundaries_past_buffer_end() {
    let boundaries = Boundaries::normalize([3, 40], true);
    assert_eq!(
        boundaries.cells(10),
        vec![CellRange::new(1, Some(2)), CellRange::new(3, None)]
    );
}

#[test]
fn normalize_dedups_sorts_and_adds_first_line() {
    let boundaries = Boundaries::normalize([8, 4, 8, 0, 15], true);
    assert_eq!(boundaries.as_slice(), &[1, 4, 8, 15]);

    let without_first = Boundaries::normalize([8, 4, 8], false);
    assert_eq!(without_first.as_slice(), &[4, 8]);
    assert!(Boundaries::normalize(Vec::new(), false).is_empty());
    assert_eq!(Boundaries::normalize(Vec::new(), true).as_slice(), &[1]);
}

#[test]
fn rows_with_tags_finds_single_header() {
    let lines = ["", "## cell header", "print('cell content')"];
    assert_eq!(rows_with_tags(&lines, &literal("##")), vec![2]);
}

#[test]
fn rows_with_tags_finds_indented_headers() {
    let lines = [
        "## cell header 1",
        "print('cell content')",
        "",
        "## cell header 2",
        "# this is a normal comment",
        "numbers = [1, 2, 3]",
        "for i in numbers:",
        "    ## cell header 3",
        "    print(i)",
    ];
    assert_eq!(rows_with_tags(&lines, &literal("##")), vec![1, 4, 8]);
}

#[test]
fn rows_with_tags_counts_multi_tag_lines_once() {
    let tags = vec!["# %%".to_string(), "#%%".to_string(), "%%".to_string()];
    let matcher = TagMatcher::new(&tags, false).expect("matcher");
    let lines = ["x = 1", "# %% first", "#%% second", "y = 2"];
    assert_eq!(rows_with_tags(&lines, &matcher), vec![2, 3]);
}

#[test]
fn regex_tags_search_anywhere_in_line() {
    let tags = vec![r"^#\s*In\[\d*\]".to_string()];
    let matcher = TagMatcher::new(&tags, true).expect("matcher");
    let lines = ["# In[1]:", "a = 1", "#In[]", "# In[x]", "b = 2  # In[3]"];
    assert_eq!(rows_with_tags(&lines, &matcher), vec![1, 3]);

    let unanchored = TagMatcher::new(&[r"In\[\d+\]".to_string()], true).expect("matcher");
    assert_eq!(rows_with_tags(&lines, &unanchored), vec![1, 5]);
}

#[test]
fn invalid_regex_is_a_configuration_error() {
    let err = TagMatcher::new(&["([".to_string()], true).expect_err("bad pattern");
    assert!(matches!(err, CellError::InvalidConfiguration(_)));
}

#[test]
fn empty_tags_are_rejected() {
    let err = TagMatcher::new(&[String::new()], false).expect_err("no tags");
    assert!(matches!(err, CellError::InvalidConfiguration(_)));
}

#[test]
fn rows_with_marks_single_mark() {
    let host = MemoryHost::new(Vec::<String>::new()).with_mark('a', 2, 1);
    assert_eq!(rows_with_marks(&host, "abcdefg"), vec![2]);
}

#[test]
fn rows_with_marks_skips_unset_and_foreign_marks() {
    let host = MemoryHost::new(Vec::<String>::new())
        .with_mark('a', 1, 1)
        .with_mark('b', 4, 1)
        .with_mark('c', 8, 1)
        .with_mark('d', 0, 0)
        .with_mark('z', 12, 0);
    assert_eq!(rows_with_marks(&host, "abcdefg"), vec![1, 4, 8]);
}

#[test]
fn discover_boundaries_follows_configured_source() {
    let host = MemoryHost::new(["a = 1", "## two", "b = 2"]).with_mark('q', 3, 0);
    let tags = CellConfig::default();
    assert_eq!(discover_boundaries(&host, &tags).expect("tags"), vec![2]);

    let marks = CellConfig {
        delimit_cells_by: BoundarySource::Marks,
        ..CellConfig::default()
    };
    assert_eq!(discover_boundaries(&host, &marks).expect("marks"), vec![3]);
    assert_eq!(
        resolve_boundaries(&host, &marks).expect("marks").as_slice(),
        &[1, 3]
    );
}
