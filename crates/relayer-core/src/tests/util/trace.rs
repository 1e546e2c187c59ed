use core::fmt::Debug;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span::{Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// An error as seen by the tracing subscriber: the span it belongs to and
/// its message.
pub type TracedError = (String, String);

/// Layer collecting the `error` field recorded on spans and the error level
/// events, each paired with the name of its span.
#[derive(Clone, Debug, Default)]
pub struct ErrorCapture {
    recorded: Arc<Mutex<Vec<TracedError>>>,
    logged: Arc<Mutex<Vec<TracedError>>>,
}

impl ErrorCapture {
    pub fn recorded(&self) -> Vec<TracedError> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn logged(&self) -> Vec<TracedError> {
        self.logged.lock().unwrap().clone()
    }
}

struct FieldValue {
    name: &'static str,
    value: Option<String>,
}

impl Visit for FieldValue {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == self.name {
            self.value = Some(format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for ErrorCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = FieldValue {
            name: "error",
            value: None,
        };
        values.record(&mut visitor);

        if let (Some(error), Some(span)) = (visitor.value, ctx.span(id)) {
            self.recorded
                .lock()
                .unwrap()
                .push((span.name().to_string(), error));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }

        let mut visitor = FieldValue {
            name: "message",
            value: None,
        };
        event.record(&mut visitor);

        let span = ctx
            .event_span(event)
            .map(|span| span.name().to_string())
            .unwrap_or_default();

        self.logged
            .lock()
            .unwrap()
            .push((span, visitor.value.unwrap_or_default()));
    }
}
