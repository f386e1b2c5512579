#![forbid(unsafe_code)]

//! Lifecycle logging integration tests.
//!
//! With the feature enabled:
//!   cargo test -p cellui-widgets --features tracing --test tracing_tests
//!
//! Without it only the silent check runs:
//!   cargo test -p cellui-widgets --test tracing_tests -- silent

use std::sync::{Arc, Mutex};

use cellui_core::geometry::{Point, Size};
use cellui_core::input::MouseState;
use cellui_widgets::console::DEFAULT_FONT_SIZE;
use cellui_widgets::screen::Screen;
use cellui_widgets::window::Window;

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event: its message and fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn new() -> (Self, Arc<Mutex<Vec<CapturedEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }
}

/// Visitor that extracts event fields.
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn with_captured_events(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let (layer, events) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn drive_window() {
    let mut screen = Screen::new(Size::new(640, 480));
    let mut window = Window::new(20, 6).with_title("Logged");
    window.show(&mut screen, true);
    let at = |x, y, left| MouseState::at_cell(Point::new(x, y), DEFAULT_FONT_SIZE).with_left(left);
    window.process_mouse(&mut screen, &at(3, 0, true));
    window.process_mouse(&mut screen, &at(5, 2, true));
    window.process_mouse(&mut screen, &at(5, 2, false));
    window.hide(&mut screen);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn lifecycle_is_logged_at_debug() {
    let events = with_captured_events(drive_window);
    let messages: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::DEBUG)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec!["window shown", "drag started", "drag ended", "window closed"]
    );

    let shown = &events[0];
    assert!(shown.fields.iter().any(|(k, v)| k == "modal" && v == "true"));
    assert!(shown.fields.iter().any(|(k, v)| k == "title" && v == "Logged"));
}

#[cfg(feature = "tracing")]
#[test]
fn drag_moves_are_traced() {
    let events = with_captured_events(drive_window);
    assert!(
        events
            .iter()
            .any(|e| e.level == tracing::Level::TRACE && e.message == "window dragged")
    );
}

#[cfg(not(feature = "tracing"))]
#[test]
fn silent_without_feature() {
    assert!(with_captured_events(drive_window).is_empty());
}
