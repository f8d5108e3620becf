use replcell::{
    Boundaries, CellConfig, CellError, CellRange, CellSession, Clipboard, Cursor, Host,
    MemoryHost, Outcome, Transport,
};

#[derive(Default)]
struct Collect(Vec<String>);

impl Transport for Collect {
    fn send(&mut self, text: &str) -> Result<(), CellError> {
        self.0.push(text.to_string());
        Ok(())
    }
}

struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&self, _text: &str) -> Result<(), CellError> {
        Err(CellError::ClipboardUnavailable("none".to_string()))
    }
}

#[test]
fn facade_exposes_boundary_resolution() {
    let boundaries = Boundaries::normalize(vec![5, 2, 2, 0], true);
    assert_eq!(boundaries.as_slice(), &[1, 2, 5]);
    assert_eq!(boundaries.current_cell(3), Some(CellRange::new(2, Some(4))));
    assert_eq!(boundaries.next_cell(5), 5);
    assert_eq!(boundaries.prev_cell(2), 1);
}

#[test]
fn navigation_works_through_the_facade() {
    let mut host = MemoryHost::new(["# %%", "a = 1", "# %%", "b = 2"]).with_cursor(2, 4);
    let mut transport = Collect::default();
    let config = CellConfig::default();
    let clipboard = NoClipboard;

    let outcome = {
        let mut session = CellSession::new(&mut host, &mut transport, &clipboard, &config);
        session.jump_next_cell()
    };
    assert_eq!(outcome.expect("jump"), Outcome::Moved { row: 3 });
    assert_eq!(host.cursor(), Cursor::new(3, 0));
    assert!(transport.0.is_empty());
}
