//! Recording layer utilities for capturing spans and events in tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::{LookupSpan, Registry};

/// Recording layer installed during tests to capture spans and events for
/// later assertions.
///
/// Spans are stored when they close, events as they are emitted. Field values
/// are kept as strings: `Debug`-formatted values keep their debug rendering
/// and the event message is stored under `message`.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Runs `f` with a fresh recording subscriber as the thread's default and
    /// returns its output together with the layer.
    ///
    /// Work that `f` hands to other threads (a rayon pool, for instance) is
    /// recorded only while those threads observe the same dispatcher, so
    /// assertions should stick to spans and events raised on the calling
    /// thread.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_test_support::tracing::RecordingLayer;
    ///
    /// let (value, layer) = RecordingLayer::capture(|| {
    ///     tracing::info_span!("demo.span").in_scope(|| tracing::info!(answer = 42, "ready"));
    ///     7
    /// });
    /// assert_eq!(value, 7);
    /// assert!(layer.span_named("demo.span").is_some());
    /// assert!(layer.has_event("ready"));
    /// ```
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Self) {
        let layer = Self::default();
        let subscriber = Registry::default().with(layer.clone());
        let output = tracing::subscriber::with_default(subscriber, f);
        (output, layer)
    }

    /// Returns a snapshot of the closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_test_support::tracing::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// assert!(layer.spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns a snapshot of the emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
        self.spans().into_iter().find(|span| span.name == name)
    }

    /// Returns the events whose message equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        self.events()
            .into_iter()
            .filter(|event| event.message() == Some(message))
            .collect()
    }

    /// Returns `true` when an event with `message` was emitted.
    #[must_use]
    pub fn has_event(&self, message: &str) -> bool {
        !self.events_with_message(message).is_empty()
    }
}

/// Snapshot of a closed span, including its name and recorded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name captured from the tracing metadata.
    pub name: String,
    /// Structured fields recorded against the span.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Returns the recorded value of `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Snapshot of an emitted tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Log level associated with the recorded event.
    pub level: Level,
    /// Event target string extracted from the metadata.
    pub target: String,
    /// Structured fields attached to the event.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the event's message, if it carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Returns the recorded value of `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

#[derive(Default)]
struct SpanData {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut data = SpanData {
            name: attrs.metadata().name().to_owned(),
            fields: HashMap::new(),
        };
        attrs.record(&mut FieldRecorder(&mut data.fields));
        span.extensions_mut().insert(data);
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        ctx: Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(data) = extensions.get_mut::<SpanData>() {
            values.record(&mut FieldRecorder(&mut data.fields));
        }
    }

    fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
        let Some(data) = ctx
            .span(&id)
            .and_then(|span| span.extensions_mut().remove::<SpanData>())
        else {
            return;
        };
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SpanRecord {
                name: data.name,
                fields: data.fields,
            });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            });
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl FieldRecorder<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_records_span_fields_and_events() {
        let ((), layer) = RecordingLayer::capture(|| {
            let span = tracing::info_span!("unit.span", points = 3_u64, label = "blob");
            span.in_scope(|| tracing::debug!(clusters = 2_u64, "phase finished"));
        });

        let span = layer.span_named("unit.span").expect("span must be recorded");
        assert_eq!(span.field("points"), Some("3"));
        assert_eq!(span.field("label"), Some("blob"));

        let events = layer.events_with_message("phase finished");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::DEBUG);
        assert_eq!(events[0].field("clusters"), Some("2"));
    }

    #[test]
    fn unmatched_queries_return_nothing() {
        let layer = RecordingLayer::default();
        assert!(layer.span_named("missing").is_none());
        assert!(!layer.has_event("missing"));
    }
}
