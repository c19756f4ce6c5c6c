// Integration tests for the trace viewer

use proptest::prelude::*;
use tracetty::config::ViewerConfig;
use tracetty::snapshot::{load, Trace};
use tracetty::ui::{App, BufferScreen, Command, Exit};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 12;
const DOWN: &[u8] = b"\x1b[B";
const UP: &[u8] = b"\x1b[A";

const SOURCE: &str = "x = 1\nf(x)\nprint(x)";

const HISTORY: &str = r#"[
    {"line": 1, "stack": [], "heap": {}},
    {"line": 2,
     "stack": [{"funName": "f", "parameters": {"x": 1}, "variables": {"y": 2}}],
     "heap": {"a": [1, 2, 3]}}
]"#;

fn open(trace: &Trace) -> App<'_, BufferScreen> {
    let mut app = App::new(
        trace,
        ViewerConfig::default(),
        BufferScreen::new(WIDTH, HEIGHT),
        WIDTH,
        HEIGHT,
    );
    app.draw().expect("initial draw failed");
    app
}

fn footer(app: &App<'_, BufferScreen>) -> String {
    app.screen().text_at(1, usize::from(HEIGHT), 11)
}

fn stack_text(app: &App<'_, BufferScreen>, row: usize) -> String {
    let layout = app.layout();
    app.screen()
        .text_at(layout.stack_column(), row, layout.frame_text_width())
        .trim_end()
        .to_string()
}

fn heap_text(app: &App<'_, BufferScreen>, row: usize) -> String {
    let layout = app.layout();
    app.screen()
        .text_at(layout.heap_column(), row, layout.heap_width())
        .trim_end()
        .to_string()
}

#[test]
fn test_two_step_scenario() {
    let trace = load(SOURCE, HISTORY).expect("history should load");
    let mut app = open(&trace);

    assert_eq!(app.current_index(), 0);
    assert_eq!(footer(&app), "Step 1 of 2");
    assert_eq!(stack_text(&app, 1), "");
    assert_eq!(heap_text(&app, 1), "");

    assert!(app.step_forward().unwrap());
    assert_eq!(footer(&app), "Step 2 of 2");
    assert_eq!(stack_text(&app, 1), "f(x=1)");
    assert_eq!(stack_text(&app, 2), "  y = 2");
    assert_eq!(heap_text(&app, 1), "&a┌─┬─┬─┐");
    assert_eq!(heap_text(&app, 2), "  │1│2│3│");
    assert_eq!(heap_text(&app, 3), "  └─┴─┴─┘");

    let before = app.screen().lines();
    assert!(!app.step_forward().unwrap());
    assert_eq!(app.current_index(), 1);
    assert_eq!(app.screen().lines(), before);
}

#[test]
fn test_screen_layout_after_draw() {
    let trace = load(SOURCE, HISTORY).unwrap();
    let app = open(&trace);
    let screen = app.screen();
    let layout = app.layout();

    assert_eq!(screen.text_at(1, 1, 9), "→ 1 x = 1");
    assert_eq!(screen.text_at(3, 2, 6), "2 f(x)");
    assert_eq!(screen.text_at(1, 2, 1), " ");
    for row in 1..=usize::from(HEIGHT) {
        assert_eq!(screen.text_at(layout.stack_divider_column, row, 1), "║");
        assert_eq!(screen.text_at(layout.heap_divider_column, row, 1), "║");
    }
}

#[test]
fn test_program_counter_follows_step() {
    let trace = load(SOURCE, HISTORY).unwrap();
    let mut app = open(&trace);
    app.step_forward().unwrap();
    assert_eq!(app.screen().text_at(1, 1, 1), " ");
    assert_eq!(app.screen().text_at(1, 2, 1), "→");
}

#[test]
fn test_forward_then_backward_restores_screen() {
    let trace = load(SOURCE, HISTORY).unwrap();
    let mut app = open(&trace);
    let initial = app.screen().lines();

    app.step_forward().unwrap();
    app.step_backward().unwrap();
    assert_eq!(app.current_index(), 0);
    assert_eq!(app.screen().lines(), initial);
}

#[test]
fn test_shrinking_heap_leaves_no_residue() {
    let source = "a\nb\nc";
    let history = r#"[
        {"line": 1, "heap": {"r": {"a_long_key": "a long value", "b": 2}, "s": [1, 2, 3, 4]}},
        {"line": 2, "heap": {"r": {"a": 1}}}
    ]"#;
    let trace = load(source, history).unwrap();
    let mut app = open(&trace);

    assert_eq!(heap_text(&app, 1), "&r┌──────────┬──────────────┐");
    assert_eq!(heap_text(&app, 2), "  │a_long_key│\"a long value\"│");
    assert_eq!(heap_text(&app, 6), "&s┌─┬─┬─┬─┐");

    app.step_forward().unwrap();
    assert_eq!(heap_text(&app, 1), "&r┌─┬─┐");
    assert_eq!(heap_text(&app, 2), "  │a│1│");
    assert_eq!(heap_text(&app, 3), "  └─┴─┘");
    for row in 4..usize::from(HEIGHT) {
        assert_eq!(heap_text(&app, row), "", "row {} not blank", row);
    }
}

#[test]
fn test_deeper_stack_erased_when_stepping_back() {
    let source = "main()\nf()\ng()";
    let history = r#"[
        {"line": 1, "stack": [{"funName": "main", "variables": {"n": 1}}]},
        {"line": 3, "stack": [
            {"funName": "main", "variables": {"n": 1}},
            {"funName": "g", "parameters": {"label": "say \"hi\""}, "variables": {"i": 0, "ok": true}}
        ]}
    ]"#;
    let trace = load(source, history).unwrap();
    let mut app = open(&trace);

    app.step_forward().unwrap();
    assert_eq!(stack_text(&app, 1), "g(label=\"say \\\"hi\\\"\")");
    assert_eq!(stack_text(&app, 2), "  i = 0");
    assert_eq!(stack_text(&app, 3), "  ok = true");
    assert_eq!(stack_text(&app, 4), "main()");
    assert_eq!(stack_text(&app, 5), "  n = 1");

    app.step_backward().unwrap();
    assert_eq!(stack_text(&app, 1), "main()");
    assert_eq!(stack_text(&app, 2), "  n = 1");
    for row in 3..=5 {
        assert_eq!(stack_text(&app, row), "");
    }
}

#[test]
fn test_record_example_widths() {
    let history = r#"[{"line": 1, "heap": {"r": {"k1": "hello", "k2": 42}}}]"#;
    let trace = load(SOURCE, history).unwrap();
    let app = open(&trace);
    assert_eq!(heap_text(&app, 1), "&r┌──┬───────┐");
    assert_eq!(heap_text(&app, 2), "  │k1│\"hello\"│");
    assert_eq!(heap_text(&app, 3), "  ├──┼───────┤");
    assert_eq!(heap_text(&app, 4), "  │k2│42     │");
    assert_eq!(heap_text(&app, 5), "  └──┴───────┘");
}

#[test]
fn test_heap_rows_keep_two_column_indent() {
    let history = r#"[{"line": 1, "heap": {"12": [1, 22], "p": [{"$ref": "12"}]}}]"#;
    let trace = load(SOURCE, history).unwrap();
    let app = open(&trace);

    assert_eq!(heap_text(&app, 1), "&12┌─┬─┐");
    assert_eq!(heap_text(&app, 2), "  │1│22│");
    assert_eq!(heap_text(&app, 3), "  └─┴─┘");
    assert_eq!(heap_text(&app, 4), "&p┌─┐");
    assert_eq!(heap_text(&app, 5), "  │12│");
    assert_eq!(heap_text(&app, 6), "  └─┘");
}

#[test]
fn test_duplicate_heap_id_fails_load() {
    let history = r#"[{"line": 1, "heap": {"a": [1], "a": {"k": 2}}}]"#;
    let err = load(SOURCE, history).unwrap_err();
    assert_eq!(err.step(), Some(1));
    assert!(err.to_string().contains("duplicate heap identifier 'a'"));
}

#[test]
fn test_long_source_keeps_footer_row() {
    let source: String = (1..=30).map(|i| format!("stmt{}\n", i)).collect();
    let history = r#"[{"line": 2}, {"line": 25}]"#;
    let trace = load(&source, history).unwrap();
    // a screen taller than the layout shows anything drawn past the panes
    let mut app = App::new(
        &trace,
        ViewerConfig::default(),
        BufferScreen::new(WIDTH, 40),
        WIDTH,
        HEIGHT,
    );
    app.draw().unwrap();
    let footer_row = usize::from(HEIGHT);

    assert_eq!(app.screen().text_at(1, 2, 1), "→");
    assert_eq!(app.screen().text_at(3, footer_row - 1, 9), "11 stmt11");
    assert_eq!(footer(&app), "Step 1 of 2");
    assert!(!app.screen().row(footer_row).contains("stmt"));

    assert!(app.step_forward().unwrap());
    assert_eq!(footer(&app), "Step 2 of 2");
    assert_eq!(app.screen().text_at(1, 2, 1), " ");
    for row in footer_row + 1..=40 {
        assert_eq!(app.screen().row_text(row), "", "row {} should be blank", row);
    }

    assert!(app.step_backward().unwrap());
    assert_eq!(app.screen().text_at(1, 2, 1), "→");
}

#[test]
fn test_scripted_session() {
    let trace = load(SOURCE, HISTORY).unwrap();
    let mut app = open(&trace);
    let events = [DOWN, DOWN, b"z".as_slice(), UP, b"\x1b[C".as_slice(), b"q".as_slice()]
        .into_iter()
        .map(|bytes| Ok::<_, std::io::Error>(bytes.to_vec()));
    assert_eq!(app.run(events).unwrap(), Exit::Quit);
    assert_eq!(app.current_index(), 0);
    assert_eq!(footer(&app), "Step 1 of 2");
}

#[test]
fn test_empty_trace() {
    let trace = load(SOURCE, "[]").unwrap();
    let mut app = open(&trace);
    assert_eq!(footer(&app), "Step 0 of 0");
    assert!(!app.step_forward().unwrap());
    assert!(!app.step_backward().unwrap());
    assert_eq!(app.current_index(), 0);
}

#[test]
fn test_demo_trace_loads() {
    let source = std::fs::read_to_string("demos/counter.fun").expect("Failed to read demo source");
    let history =
        std::fs::read_to_string("demos/counter.history").expect("Failed to read demo history");
    let trace = load(&source, &history).expect("demo history should load");
    assert!(trace.len() > 1);

    let mut app = open(&trace);
    while app.step_forward().unwrap() {}
    assert_eq!(app.current_index(), trace.len() - 1);
}

fn long_trace(steps: usize) -> Trace {
    let snapshots: Vec<String> = (0..steps)
        .map(|i| {
            let vars = (0..i % 4)
                .map(|v| format!("\"v{}\": {}", v, v * i))
                .collect::<Vec<_>>()
                .join(", ");
            let cells = (0..i % 5).map(|c| c.to_string()).collect::<Vec<_>>().join(", ");
            format!(
                r#"{{"line": {}, "stack": [{{"funName": "main", "variables": {{{}}}}}], "heap": {{"h": [{}]}}}}"#,
                i % 3 + 1,
                vars,
                cells
            )
        })
        .collect();
    load(SOURCE, &format!("[{}]", snapshots.join(","))).expect("generated history should load")
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![Just(Command::StepForward), Just(Command::StepBackward)]
}

proptest! {
    #[test]
    fn prop_index_stays_in_bounds(steps in 1usize..12, commands in prop::collection::vec(command(), 0..40)) {
        let trace = long_trace(steps);
        let mut app = open(&trace);
        for command in commands {
            app.apply(command).unwrap();
            prop_assert!(app.current_index() < trace.len());
        }
    }

    #[test]
    fn prop_round_trip_restores_screen(steps in 2usize..10, start in 0usize..10, forward_first in any::<bool>()) {
        let trace = long_trace(steps);
        let mut app = open(&trace);
        let start = start % steps;
        for _ in 0..start {
            app.step_forward().unwrap();
        }
        let index = app.current_index();
        let before = app.screen().lines();

        let (first, second) = if forward_first {
            (Command::StepForward, Command::StepBackward)
        } else {
            (Command::StepBackward, Command::StepForward)
        };
        let away_from_boundary = if forward_first { index + 1 < steps } else { index > 0 };
        prop_assume!(away_from_boundary);

        app.apply(first).unwrap();
        app.apply(second).unwrap();
        prop_assert_eq!(app.current_index(), index);
        prop_assert_eq!(app.screen().lines(), before);
    }

    #[test]
    fn prop_boundary_steps_are_idempotent(steps in 1usize..8, repeats in 1usize..5) {
        let trace = long_trace(steps);
        let mut app = open(&trace);
        let at_start = app.screen().lines();
        for _ in 0..repeats {
            prop_assert!(!app.step_backward().unwrap());
        }
        prop_assert_eq!(app.screen().lines(), at_start);

        while app.step_forward().unwrap() {}
        let at_end = app.screen().lines();
        for _ in 0..repeats {
            prop_assert!(!app.step_forward().unwrap());
        }
        prop_assert_eq!(app.current_index(), steps - 1);
        prop_assert_eq!(app.screen().lines(), at_end);
    }
}
