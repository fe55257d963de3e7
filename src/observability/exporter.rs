//! File-based OpenTelemetry span exporter.
//!
//! Each exported batch becomes one OTLP JSON document appended as a single
//! line to a [`RotatingFile`], so traces can be inspected offline from
//! inside the plugin sandbox.

use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope written into every batch.
const SCOPE_NAME: &str = "homescout";

struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let line = otlp_batch(&self.resource, &batch).to_string();
        let result = self
            .file
            .append_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        self.resource = res.clone();
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a tracer provider that exports every span to `file_path` as soon
/// as it closes.
#[must_use]
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(file_path),
        resource: resource.clone(),
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

/// Wraps `batch` in a `resourceSpans` document.
///
/// ```json
/// {"resourceSpans":[{"resource":{"attributes":[..]},
///   "scopeSpans":[{"scope":{"name":"homescout"},"spans":[..]}]}]}
/// ```
fn otlp_batch(resource: &Resource, batch: &[SpanData]) -> JsonValue {
    let resource_attrs: Vec<JsonValue> = resource
        .iter()
        .map(|(k, v)| json!({ "key": k.to_string(), "value": attribute_value(v) }))
        .collect();

    json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attrs },
            "scopeSpans": [{
                "scope": { "name": SCOPE_NAME },
                "spans": batch.iter().map(format_span).collect::<Vec<_>>()
            }]
        }]
    })
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": span_kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

const fn span_kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) }))
        .collect()
}

/// OTLP encodes 64-bit integers as strings; arrays fall back to their debug
/// form.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.to_string() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

/// Nanoseconds since the epoch as a decimal string; pre-epoch times are 0.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn unix_nanos_is_decimal_string() {
        let t = UNIX_EPOCH + Duration::from_millis(1_500);
        assert_eq!(unix_nanos(t), "1500000000");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }

    #[test]
    fn integer_attributes_are_strings() {
        let attrs = attributes(&[
            KeyValue::new("listing_count", 42_i64),
            KeyValue::new("path", "/host/listings.json"),
            KeyValue::new("loading", true),
        ]);
        assert_eq!(attrs[0]["value"]["intValue"], "42");
        assert_eq!(attrs[1]["value"]["stringValue"], "/host/listings.json");
        assert_eq!(attrs[2]["value"]["boolValue"], true);
    }

    #[test]
    fn batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Homescout")]);
        let doc = otlp_batch(&resource, &[]);

        let group = &doc["resourceSpans"][0];
        assert_eq!(group["resource"]["attributes"][0]["key"], "service.name");
        assert_eq!(
            group["resource"]["attributes"][0]["value"]["stringValue"],
            "Homescout"
        );
        assert_eq!(group["scopeSpans"][0]["scope"]["name"], SCOPE_NAME);
        assert_eq!(group["scopeSpans"][0]["spans"], json!([]));
    }
}
