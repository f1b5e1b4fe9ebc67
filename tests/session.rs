use std::collections::VecDeque;
use std::io::{self, Read};

use qjp::prelude::*;
use ratatui::backend::{Backend, ClearType, TestBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Modifier;

const UP: &[u8] = &[27, 91, 65];
const DOWN: &[u8] = &[27, 91, 66];
const RIGHT: &[u8] = &[27, 91, 67];
const TOGGLE: &[u8] = &[0];
const ENTER: &[u8] = b"\r";
const ESC: &[u8] = &[27];
const CTRL_C: &[u8] = &[3];
const BACKSPACE: &[u8] = &[127];

/// Key presses handed out one per read, like a raw terminal delivers them
struct Keys(VecDeque<Vec<u8>>);

impl Keys {
    fn new(keys: &[&[u8]]) -> Self {
        Self(keys.iter().map(|k| k.to_vec()).collect())
    }
}

impl Read for Keys {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }
}

struct FailingInput;

impl Read for FailingInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device gone"))
    }
}

/// A terminal that cannot tell its size, drawing into an 80x24 screen
struct UnsizedBackend {
    screen: TestBackend,
    size: Option<Size>,
}

impl UnsizedBackend {
    fn new(size: Option<Size>) -> Self {
        Self {
            screen: TestBackend::new(80, 24),
            size,
        }
    }
}

impl Backend for UnsizedBackend {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.screen.draw(content).map_err(|e| match e {})
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.screen.hide_cursor().map_err(|e| match e {})
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.screen.show_cursor().map_err(|e| match e {})
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.screen.get_cursor_position().map_err(|e| match e {})
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.screen.set_cursor_position(position).map_err(|e| match e {})
    }

    fn clear(&mut self) -> io::Result<()> {
        self.screen.clear().map_err(|e| match e {})
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.screen.clear_region(clear_type).map_err(|e| match e {})
    }

    fn size(&self) -> io::Result<Size> {
        self.size.ok_or_else(|| io::Error::other("no size"))
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Err(io::Error::other("no size"))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.screen.flush().map_err(|e| match e {})
    }
}

fn people() -> Vec<Record> {
    parse_records(
        br#"[
            {"name": "Alpha", "id": 1},
            {"name": "Beta", "id": 22},
            {"name": "Gamma", "id": 333}
        ]"#,
        false,
    )
    .unwrap()
}

fn run_session(
    records: &[Record],
    options: &QjpOptions,
    width: u16,
    height: u16,
    input: &mut impl Read,
) -> (color_eyre::Result<QjpOutput>, Tui<TestBackend>) {
    let mut tui = Tui::new_for_test(TestBackend::new(width, height)).unwrap();
    let spec = options.display_spec(records);
    let app = App::new(DisplayPool::new(records, &spec), tui.geometry(), ColorTheme::none());
    let output = Qjp::run_on(&mut tui, input, app);
    (output, tui)
}

fn names() -> QjpOptions {
    QjpOptionsBuilder::default()
        .display(vec!["name".to_string()])
        .build()
        .unwrap()
}

/// Rows of the last frame, right-trimmed, without the blank rows at the bottom
fn screen(tui: &Tui<TestBackend>) -> Vec<String> {
    let buffer = tui.backend().buffer();
    let mut rows: Vec<String> = (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

#[test]
fn initial_frame() {
    let (output, tui) = run_session(&people(), &names(), 40, 10, &mut Keys::new(&[ESC]));
    assert!(output.unwrap().is_abort);
    insta::assert_debug_snapshot!(screen(&tui), @r#"
    [
        "Filter:",
        "> Alpha",
        "  Beta",
        "  Gamma",
    ]
    "#);
}

#[test]
fn filter_then_confirm() {
    let records = people();
    let (output, tui) = run_session(&records, &names(), 40, 10, &mut Keys::new(&[b"e", ENTER]));
    let output = output.unwrap();
    assert!(!output.is_abort);
    assert_eq!(output.query, "e");
    assert_eq!(output.selected, vec![1]);
    assert_eq!(screen(&tui), vec!["Filter: e", "> Beta"]);
    assert_eq!(
        format_selection(&records, &output.selected, Some("id")).unwrap(),
        vec!["22"]
    );
}

#[test]
fn filter_is_case_insensitive() {
    let (output, _) = run_session(&people(), &names(), 40, 10, &mut Keys::new(&[b"M", b"m", ENTER]));
    assert_eq!(output.unwrap().selected, vec![2]);
}

#[test]
fn no_matches() {
    let (output, tui) = run_session(&people(), &names(), 40, 10, &mut Keys::new(&[b"z", ENTER]));
    assert!(output.unwrap().selected.is_empty());
    assert_eq!(screen(&tui), vec!["Filter: z", "  (no matches)"]);
}

#[test]
fn backspace_restores_matches() {
    let (output, tui) = run_session(
        &people(),
        &names(),
        40,
        10,
        &mut Keys::new(&[b"z", BACKSPACE, BACKSPACE, DOWN, ENTER]),
    );
    assert_eq!(output.unwrap().selected, vec![1]);
    assert_eq!(screen(&tui), vec!["Filter:", "  Alpha", "> Beta", "  Gamma"]);
}

#[test]
fn multi_select_returns_marks_in_order() {
    let (output, tui) = run_session(
        &people(),
        &names(),
        40,
        10,
        &mut Keys::new(&[DOWN, DOWN, TOGGLE, UP, UP, TOGGLE, ENTER]),
    );
    assert_eq!(output.unwrap().selected, vec![0, 2]);
    // toggling moved the cursor down to Beta; both marks stay underlined
    let buffer = tui.backend().buffer();
    assert!(buffer[(2u16, 1u16)].modifier.contains(Modifier::UNDERLINED));
    assert!(!buffer[(2u16, 2u16)].modifier.contains(Modifier::UNDERLINED));
    assert!(buffer[(2u16, 2u16)].modifier.contains(Modifier::REVERSED));
    assert!(buffer[(2u16, 3u16)].modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn marks_hidden_by_filter_are_still_returned() {
    let (output, _) = run_session(
        &people(),
        &names(),
        40,
        10,
        &mut Keys::new(&[TOGGLE, b"g", ENTER]),
    );
    assert_eq!(output.unwrap().selected, vec![0]);
}

#[test]
fn abort_keys() {
    for key in [ESC, CTRL_C] {
        let (output, _) = run_session(&people(), &names(), 40, 10, &mut Keys::new(&[DOWN, key]));
        let output = output.unwrap();
        assert!(output.is_abort);
        assert!(output.selected.is_empty());
    }
}

#[test]
fn unknown_sequences_are_ignored() {
    let (output, tui) = run_session(
        &people(),
        &names(),
        40,
        10,
        &mut Keys::new(&[RIGHT, &[1], b"ab", ENTER]),
    );
    let output = output.unwrap();
    assert_eq!(output.query, "");
    assert_eq!(output.selected, vec![0]);
    assert_eq!(screen(&tui)[0], "Filter:");
}

#[test]
fn newline_confirms() {
    let (output, _) = run_session(&people(), &names(), 40, 10, &mut Keys::new(&[DOWN, b"\n"]));
    assert_eq!(output.unwrap().selected, vec![1]);
}

#[test]
fn closed_input_is_an_error() {
    let (output, _) = run_session(&people(), &names(), 40, 10, &mut Keys::new(&[DOWN]));
    assert_eq!(output.unwrap_err().to_string(), "terminal input closed");
}

#[test]
fn read_failure_is_an_error() {
    let (output, _) = run_session(&people(), &names(), 40, 10, &mut FailingInput);
    assert!(output.unwrap_err().to_string().contains("device gone"));
}

#[test]
fn table_mode_aligns_columns() {
    let options = QjpOptionsBuilder::default()
        .display(vec!["name".to_string(), "id".to_string()])
        .table(true)
        .build()
        .unwrap();
    let (_, tui) = run_session(&people(), &options, 40, 10, &mut Keys::new(&[ESC]));
    insta::assert_debug_snapshot!(screen(&tui), @r#"
    [
        "Filter:",
        "> Alpha  1",
        "  Beta   22",
        "  Gamma  333",
    ]
    "#);
}

#[test]
fn separator_joins_fields() {
    let options = QjpOptionsBuilder::default()
        .display(vec!["id".to_string(), "name".to_string()])
        .separator(" | ")
        .build()
        .unwrap();
    let (_, tui) = run_session(&people(), &options, 40, 10, &mut Keys::new(&[ESC]));
    assert_eq!(screen(&tui)[1], "> 1 | Alpha");
}

#[test]
fn whole_record_without_display_fields() {
    let (_, tui) = run_session(&people(), &QjpOptions::default(), 40, 10, &mut Keys::new(&[ESC]));
    assert_eq!(screen(&tui)[1], r#"> {"id":1,"name":"Alpha"}"#);
}

#[test]
fn long_items_wrap() {
    let records = parse_records(format!("{}\n{}\n", "x".repeat(30), "y".repeat(30)).as_bytes(), true).unwrap();
    let options = QjpOptionsBuilder::default().lines(true).build().unwrap();
    let (_, tui) = run_session(&records, &options, 12, 10, &mut Keys::new(&[ESC]));
    insta::assert_debug_snapshot!(screen(&tui), @r#"
    [
        "Filter:",
        "> xxxxxxxxxx",
        "xxxxxxxxxxxx",
        "xxxxxxxx",
        "  yyyyyyyyyy",
        "yyyyyyyyyyyy",
        "yyyyyyyy",
    ]
    "#);
}

#[test]
fn long_items_truncate() {
    let records = parse_records(format!(r#"[{{"name": "{}"}}]"#, "x".repeat(30)).as_bytes(), false).unwrap();
    let options = QjpOptionsBuilder::default()
        .display(vec!["name".to_string()])
        .truncate(true)
        .build()
        .unwrap();
    let (_, tui) = run_session(&records, &options, 12, 10, &mut Keys::new(&[ESC]));
    assert_eq!(screen(&tui), vec!["Filter:", "> xxxxxxx..."]);
}

#[test]
fn window_scrolls_with_cursor() {
    let input: String = (0..30).map(|i| format!("line {i}\n")).collect();
    let records = parse_records(input.as_bytes(), true).unwrap();
    let options = QjpOptionsBuilder::default().lines(true).build().unwrap();
    let keys: Vec<&[u8]> = std::iter::repeat_n(DOWN, 12).chain([ENTER]).collect();
    // 10 rows leave 6 for items
    let (output, tui) = run_session(&records, &options, 40, 10, &mut Keys::new(&keys));
    assert_eq!(output.unwrap().selected, vec![12]);
    let rows = screen(&tui);
    assert_eq!(rows.len(), 7);
    assert!(rows.contains(&"> line 12".to_string()));
    assert_eq!(rows[1], "  line 9");
}

#[test]
fn cursor_stays_in_bounds() {
    let (output, _) = run_session(
        &people(),
        &names(),
        40,
        10,
        &mut Keys::new(&[UP, UP, DOWN, DOWN, DOWN, DOWN, ENTER]),
    );
    assert_eq!(output.unwrap().selected, vec![2]);
}

#[test]
fn unknown_terminal_size_falls_back_to_80x24() {
    for size in [None, Some(Size::new(0, 0))] {
        let mut tui = Tui::new_for_test(UnsizedBackend::new(size)).unwrap();
        assert_eq!(tui.geometry(), Geometry::new(80, 24));
        assert_eq!(tui.get_frame().area(), Rect::new(0, 0, 80, 24));

        let records = people();
        let spec = names().display_spec(&records);
        let app = App::new(DisplayPool::new(&records, &spec), tui.geometry(), ColorTheme::none());
        let output = Qjp::run_on(&mut tui, &mut Keys::new(&[DOWN, ENTER]), app).unwrap();
        assert_eq!(output.selected, vec![1]);

        let buffer = tui.backend().screen.buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        };
        assert_eq!(row(0), "Filter:");
        assert_eq!(row(2), "> Beta");
    }
}
