//! WASM browser tests for the JS bindings.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use excerpt_js::{
    JsExcerptAligner, JsSegment, JsSegmentKind, JsSelectionState, JsSelectionTracker,
    align_excerpts,
};

const FOX: &str = "The quick brown fox jumps.";
const OVERLAPPING: &str = r#"[{"id":"fox","rawExcerpt":"fox"},{"id":"brown_fox","rawExcerpt":"brown fox"}]"#;

fn ok<T>(result: Result<T, JsError>) -> T {
    match result {
        Ok(value) => value,
        Err(_) => panic!("unexpected JsError"),
    }
}

fn json(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

fn segments(value: JsValue) -> Vec<JsSegment> {
    serde_wasm_bindgen::from_value(value).unwrap()
}

fn texts(segments: &[JsSegment]) -> Vec<String> {
    segments.iter().map(|s| s.display_text.clone()).collect()
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn make_container(text: &str) -> web_sys::Element {
    let document = document();
    let div = document.create_element("div").unwrap();
    div.set_text_content(Some(text));
    document.body().unwrap().append_child(&div).unwrap();
    div
}

/// Select `start..end` (UTF-16) of the first text node in `element`.
fn select_text(element: &web_sys::Element, start: u32, end: u32) {
    let range = document().create_range().unwrap();
    let text_node = element.first_child().unwrap();
    range.set_start(&text_node, start).unwrap();
    range.set_end(&text_node, end).unwrap();

    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();
}

fn keyup() {
    let event = web_sys::Event::new("keyup").unwrap();
    document().dispatch_event(&event).unwrap();
}

/// JS callback that records every state it is called with.
struct Recorder {
    seen: Rc<RefCell<Vec<JsSelectionState>>>,
    _closure: Closure<dyn FnMut(JsValue)>,
    function: js_sys::Function,
}

impl Recorder {
    fn new() -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let closure = {
            let seen = seen.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
                let state: JsSelectionState = serde_wasm_bindgen::from_value(value).unwrap();
                seen.borrow_mut().push(state);
            })
        };
        let function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        Self {
            seen,
            _closure: closure,
            function,
        }
    }

    fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    fn last(&self) -> JsSelectionState {
        self.seen.borrow().last().cloned().unwrap()
    }
}

// === alignExcerpts ===

#[wasm_bindgen_test]
fn test_align_excerpts_example() {
    let excerpts =
        json(r#"[{"id":"a","rawExcerpt":"quick brown","displayExcerpt":"QUICK BROWN"}]"#);
    let result = segments(ok(align_excerpts(
        Some(FOX.into()),
        excerpts,
        JsValue::UNDEFINED,
        Some("a".into()),
    )));

    assert_eq!(texts(&result), ["The ", "QUICK BROWN", " fox jumps."]);
    assert_eq!(result[1].kind, JsSegmentKind::Tagged);
    assert_eq!((result[1].start, result[1].end), (4, 15));
    assert!(result[1].active);
    assert!(!result[0].active);
}

#[wasm_bindgen_test]
fn test_align_excerpts_missing_inputs() {
    let result = segments(ok(align_excerpts(
        Some("abc".into()),
        JsValue::NULL,
        JsValue::NULL,
        None,
    )));
    assert_eq!(texts(&result), ["abc"]);
    assert_eq!(result[0].kind, JsSegmentKind::Plain);

    let result = segments(ok(align_excerpts(
        Some("abc".into()),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        None,
    )));
    assert_eq!(texts(&result), ["abc"]);

    let result = segments(ok(align_excerpts(None, json("[]"), JsValue::UNDEFINED, None)));
    assert!(result.is_empty());
}

#[wasm_bindgen_test]
fn test_align_excerpts_rejects_bad_input() {
    let bad_options = align_excerpts(
        Some(FOX.into()),
        JsValue::NULL,
        json(r#"{"overlap":"sometimes"}"#),
        None,
    );
    assert!(bad_options.is_err());

    // Every excerpt needs an id
    let bad_excerpts = align_excerpts(
        Some(FOX.into()),
        json(r#"[{"rawExcerpt":"fox"}]"#),
        JsValue::UNDEFINED,
        None,
    );
    assert!(bad_excerpts.is_err());
}

#[wasm_bindgen_test]
fn test_align_excerpts_permissive_option() {
    let result = segments(ok(align_excerpts(
        Some(FOX.into()),
        json(OVERLAPPING),
        json(r#"{"overlap":"permissive"}"#),
        None,
    )));
    assert_eq!(texts(&result), ["The quick ", "brown fox", "fox", " jumps."]);
}

// === JsExcerptAligner ===

#[wasm_bindgen_test]
fn test_aligner_reuses_and_recomputes() {
    let mut aligner = ok(JsExcerptAligner::new(JsValue::UNDEFINED));

    let first = segments(ok(aligner.segments(Some(FOX.into()), json(OVERLAPPING), None)));
    assert_eq!(texts(&first), ["The quick ", "brown fox", " jumps."]);

    let again = segments(ok(aligner.segments(Some(FOX.into()), json(OVERLAPPING), None)));
    assert_eq!(texts(&again), texts(&first));

    ok(aligner.set_options(json(r#"{"overlap":"permissive"}"#)));
    let permissive = segments(ok(aligner.segments(Some(FOX.into()), json(OVERLAPPING), None)));
    assert_eq!(permissive.len(), 4);

    assert!(aligner.set_options(json(r#"{"matching":"everywhere"}"#)).is_err());

    aligner.invalidate();
    let after = segments(ok(aligner.segments(Some(FOX.into()), json(OVERLAPPING), None)));
    assert_eq!(texts(&after), texts(&permissive));
}

// === JsSelectionTracker ===

#[wasm_bindgen_test]
fn test_tracker_without_container() {
    let mut tracker = ok(JsSelectionTracker::new(None, None));

    assert!(ok(tracker.anchor()).is_undefined());
    let state: JsSelectionState = serde_wasm_bindgen::from_value(ok(tracker.state())).unwrap();
    assert!(!state.can_add);
    assert!(state.selected_text.is_none());

    assert!(!tracker.is_disposed());
    tracker.dispose();
    assert!(tracker.is_disposed());
}

#[wasm_bindgen_test]
fn test_take_selected_text_reports_cleared_state() {
    let container = make_container(FOX);
    let recorder = Recorder::new();
    let tracker = ok(JsSelectionTracker::new(
        Some(container.clone()),
        Some(recorder.function.clone()),
    ));

    select_text(&container, 4, 9);
    keyup();
    assert_eq!(recorder.count(), 1);
    assert!(recorder.last().can_add);
    assert!(!ok(tracker.anchor()).is_undefined());

    assert_eq!(ok(tracker.take_selected_text()).as_deref(), Some("quick"));
    assert_eq!(recorder.count(), 2);
    let last = recorder.last();
    assert!(!last.can_add);
    assert!(last.selected_text.is_none());
    assert!(last.bounding_rect.is_none());

    drop(tracker);
    container.remove();
}

#[wasm_bindgen_test]
fn test_set_disabled_reports_can_add() {
    let container = make_container(FOX);
    let recorder = Recorder::new();
    let tracker = ok(JsSelectionTracker::new(
        Some(container.clone()),
        Some(recorder.function.clone()),
    ));

    select_text(&container, 10, 15);
    keyup();
    assert!(recorder.last().can_add);

    tracker.set_disabled(true);
    assert_eq!(recorder.count(), 2);
    assert!(!recorder.last().can_add);
    assert_eq!(recorder.last().selected_text.as_deref(), Some("brown"));

    // Unchanged flag: no notification
    tracker.set_disabled(true);
    assert_eq!(recorder.count(), 2);
    assert_eq!(ok(tracker.take_selected_text()), None);

    tracker.set_disabled(false);
    assert_eq!(recorder.count(), 3);
    assert!(recorder.last().can_add);

    drop(tracker);
    container.remove();
    web_sys::window()
        .unwrap()
        .get_selection()
        .unwrap()
        .unwrap()
        .remove_all_ranges()
        .unwrap();
}

#[wasm_bindgen_test]
fn test_refresh_reports_and_dispose_stops_events() {
    let container = make_container(FOX);
    let recorder = Recorder::new();
    let mut tracker = ok(JsSelectionTracker::new(
        Some(container.clone()),
        Some(recorder.function.clone()),
    ));

    select_text(&container, 4, 9);
    let state: JsSelectionState = serde_wasm_bindgen::from_value(ok(tracker.refresh())).unwrap();
    assert_eq!(state.selected_text.as_deref(), Some("quick"));
    assert_eq!(recorder.count(), 1);

    // Same selection: nothing to report
    ok(tracker.refresh());
    assert_eq!(recorder.count(), 1);

    tracker.dispose();
    select_text(&container, 10, 15);
    keyup();
    assert_eq!(recorder.count(), 1);

    drop(tracker);
    container.remove();
    web_sys::window()
        .unwrap()
        .get_selection()
        .unwrap()
        .unwrap()
        .remove_all_ranges()
        .unwrap();
}
