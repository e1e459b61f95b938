#![forbid(unsafe_code)]

//! Tracing event tests for the lock protocol.
//!
//! Verify that transitions and rejections are observable through `tracing`
//! with the fields operators filter on.
//!
//! Run:
//!   cargo test -p fdnd-core --test tracing_lock_events

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use fdnd_core::{DragDropContext, SensorApi};
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn context(items: &[&str]) -> (DragDropContext, SensorApi) {
    let slot = Rc::new(RefCell::new(None));
    let captured = slot.clone();
    let ctx = DragDropContext::builder()
        .items(items)
        .sensor(move |api| *captured.borrow_mut() = Some(api))
        .build();
    let api = slot.borrow_mut().take().unwrap();
    (ctx, api)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn rejection_logs_reason() {
    let events = capture(|| {
        let (_ctx, api) = context(&["A", "B"]);
        let _held = api.try_get_lock("A").unwrap();
        assert!(api.try_get_lock("B").is_none());
        assert!(api.try_get_lock("nope").is_none());
    });
    let reasons: Vec<&str> = events
        .iter()
        .filter(|e| e.message == "lock rejected")
        .filter_map(|e| e.fields.get("reason").map(String::as_str))
        .collect();
    assert_eq!(reasons, ["lock already claimed", "lock already claimed"]);
}

#[test]
fn unknown_id_rejected_when_idle() {
    let events = capture(|| {
        let (_ctx, api) = context(&["A"]);
        assert!(api.try_get_lock("nope").is_none());
    });
    let rejected = events
        .iter()
        .find(|e| e.message == "lock rejected")
        .expect("rejection event");
    assert_eq!(rejected.level, tracing::Level::DEBUG);
    assert_eq!(rejected.fields["reason"], "unknown draggable");
    assert_eq!(rejected.fields["draggable_id"], "nope");
}

#[test]
fn gesture_finish_carries_indices() {
    let events = capture(|| {
        let (_ctx, api) = context(&["A", "B", "C"]);
        let drag = api.try_get_lock("C").unwrap().snap_lift().unwrap();
        drag.move_up();
        drag.drop();
    });
    let finished = events
        .iter()
        .find(|e| e.message == "gesture finished")
        .expect("finish event");
    assert_eq!(finished.fields["source"], "2");
    assert_eq!(finished.fields["destination"], "Some(1)");
    assert_eq!(finished.fields["reason"], "Drop");
    assert_eq!(finished.fields["external"], "false");
}

#[test]
fn no_warnings_on_clean_gesture() {
    let events = capture(|| {
        let (_ctx, api) = context(&["A", "B"]);
        let drag = api.try_get_lock("A").unwrap().snap_lift().unwrap();
        drag.move_down();
        drag.drop();
    });
    assert!(events.iter().all(|e| e.level > tracing::Level::WARN));
}
