//! End-to-end flows across the calculator, drawing surface and assistant.

use calc_core::assistant::gemini;
use calc_core::calculator::{Calculator, CalculatorMode, KeyAction};
use calc_core::drawing::{Color, DrawingSurface, SnapshotUpdate, Tool};
use calc_core::history::{History, HistorySink, MAX_ENTRIES};
use calc_core::i18n::Language;
use calc_core::units::{CssPoint, CssPx, CssSize, DevicePixelRatio};
use calc_core::AssistantSession;

fn press_all(calc: &mut Calculator, history: &mut History, keys: &[KeyAction]) {
    let strings = Language::En.strings();
    for key in keys {
        calc.apply(*key, history, strings);
    }
}

#[test]
fn test_scientific_keypad_session() {
    let keys = CalculatorMode::Scientific.keypad().unwrap();
    let find = |label: &str| {
        keys.iter()
            .find(|k| k.label == label)
            .map(|k| k.action)
            .unwrap()
    };

    let mut calc = Calculator::new();
    let mut history = History::new();
    press_all(
        &mut calc,
        &mut history,
        &[find("√"), find("1"), find("6"), find(")"), find("+"), find("3"), find("!"), find("=")],
    );
    assert_eq!(calc.display(), "10");
    assert_eq!(calc.caption(), "√(16)+3! =");

    press_all(&mut calc, &mut history, &[find("2"), find("^"), find("8"), find("=")]);
    assert_eq!(calc.display(), "256");

    let results: Vec<_> = history.iter().map(|e| e.result.clone()).collect();
    assert_eq!(results, vec!["256", "10"]);
}

#[test]
fn test_error_recovery_and_history_bound() {
    let mut calc = Calculator::new();
    let mut history = History::new();
    let strings = Language::En.strings();

    for i in 0..=MAX_ENTRIES {
        calc.input(&i.to_string());
        calc.input("+0");
        calc.calculate(&mut history, strings);
    }
    calc.input("ln(-1)");
    calc.calculate(&mut history, strings);
    assert_eq!(calc.display(), strings.error_math);

    calc.input("8");
    assert_eq!(calc.display(), "8");

    assert_eq!(history.len(), MAX_ENTRIES);
    assert_eq!(history.latest().unwrap().result, MAX_ENTRIES.to_string());
}

#[test]
fn test_deeply_nested_input_shows_error() {
    let mut calc = Calculator::new();
    let mut history = History::new();
    let strings = Language::En.strings();

    calc.input(&format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000)));
    calc.calculate(&mut history, strings);
    assert_eq!(calc.display(), strings.error_math);
    assert!(history.is_empty());

    calc.input("((2))");
    calc.calculate(&mut history, strings);
    assert_eq!(calc.display(), "2");
}

#[test]
fn test_custom_history_sink() {
    struct Recorder(Vec<(String, String)>);

    impl HistorySink for Recorder {
        fn record(&mut self, expression: &str, result: &str) {
            self.0.push((expression.to_string(), result.to_string()));
        }
    }

    let mut calc = Calculator::new();
    let mut sink = Recorder(Vec::new());
    calc.input("7÷2");
    calc.calculate(&mut sink, Language::En.strings());
    calc.input("1÷0");
    calc.calculate(&mut sink, Language::En.strings());

    assert_eq!(sink.0, vec![("7÷2".to_string(), "3.5".to_string())]);
}

#[test]
fn test_sketch_to_request() {
    let dpr = DevicePixelRatio::new(2.0).unwrap();
    let mut surface =
        DrawingSurface::new(CssSize::new(CssPx(200.0), CssPx(150.0)), dpr).unwrap();
    surface
        .layout(CssPoint::new(40.0, 60.0), surface.css_size())
        .unwrap();

    let mut session = AssistantSession::new();
    session.toggle_drawing_mode();
    session.select_color(Color::BLUE);
    surface.set_tool(session.tool());
    surface.set_color(session.color());

    assert!(surface.pointer_down(CssPoint::new(50.0, 100.0)));
    surface.pointer_move(CssPoint::new(150.0, 100.0));
    let update = surface.pointer_up().unwrap().unwrap();
    session.canvas_changed(update);

    // CSS (50, 40) local -> physical (100, 80)
    assert_eq!(surface.pixel_at(100, 80), Some(Color::BLUE));

    let request = session.begin_submit(Language::En).unwrap();
    let image = request.image.clone().unwrap();
    assert_eq!(image.size().width, 400);
    assert_eq!(image.size().height, 300);

    let body = serde_json::to_value(gemini::build_request(&request)).unwrap();
    assert_eq!(
        body["contents"][0]["parts"][0]["inlineData"]["data"],
        image.to_base64()
    );
}

#[test]
fn test_resize_drag_then_clear() {
    let mut surface = DrawingSurface::with_width(CssPx(120.0), DevicePixelRatio::ONE).unwrap();
    surface.pointer_down(CssPoint::new(10.0, 10.0));
    surface.pointer_move(CssPoint::new(110.0, 10.0));
    surface.pointer_up().unwrap();

    surface.begin_resize();
    surface.resize_drag(CssPx(400.0)).unwrap();
    let update = surface.end_resize().unwrap();
    let snapshot = update.and_then(SnapshotUpdate::into_snapshot).unwrap();
    assert_eq!(snapshot.size().height, 400);

    assert_eq!(surface.pixel_at(60, 10), Some(Color::GREEN));
    assert_eq!(surface.pixel_at(60, 300), Some(Color::BACKGROUND));

    let mut session = AssistantSession::new();
    session.canvas_changed(SnapshotUpdate::Snapshot(snapshot));
    session.canvas_changed(surface.clear());
    assert!(session.canvas().is_none());

    surface.set_tool(Tool::Eraser);
    assert!(surface.pointer_down(CssPoint::new(5.0, 5.0)));
    surface.pointer_move(CssPoint::new(6.0, 6.0));
    let update = surface.pointer_up().unwrap();
    assert!(matches!(update, Some(SnapshotUpdate::Snapshot(_))));
}
