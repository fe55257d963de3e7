//! Worker-side message processing.
//!
//! [`ListingWorker`] runs on the Zellij worker thread. It owns no long-lived
//! resources: every `LoadListings` request opens the document named in the
//! message, normalizes it and answers with the full listing set. Failures are
//! caught here and reported as [`WorkerResponse::LoadFailed`]; they never
//! cross the thread boundary as panics or dropped messages.

use crate::domain::error::Result;
use crate::domain::Listing;
use crate::storage::{JsonListingSource, ListingSource};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Worker thread state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListingWorker {
    /// Number of load requests served, for log correlation only.
    #[serde(skip)]
    loads_served: u64,
}

impl ListingWorker {
    #[must_use]
    pub const fn new() -> Self {
        Self { loads_served: 0 }
    }

    /// Standardizes success and failure logging across worker operations.
    fn handle_load_result(operation: &str, result: Result<Vec<Listing>>) -> WorkerResponse {
        match result {
            Ok(listings) => {
                tracing::debug!(operation = operation, count = listings.len(), "worker operation successful");
                WorkerResponse::ListingsLoaded { listings }
            }
            Err(e) => {
                tracing::error!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::LoadFailed {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_listings(&mut self, path: String) -> WorkerResponse {
        self.loads_served += 1;
        let source = JsonListingSource::new(PathBuf::from(path));
        tracing::debug!(path = ?source.path(), load = self.loads_served, "loading listings");
        Self::handle_load_result("load listings", source.load())
    }

    /// Reconstructs the plugin-side span context carried in `message` so
    /// that worker spans join the same trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadListings { path, .. } => self.handle_load_listings(path),
        }
    }

    /// Decodes a raw IPC payload, handles it, and encodes the response.
    ///
    /// A payload that is not a `WorkerMessage` is answered with
    /// `LoadFailed`, so the plugin never waits on a request it cannot see.
    /// Returns `None` only when the response cannot be encoded.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::LoadFailed {
                    message: format!("undecodable worker message: {e}"),
                }
            }
        };

        serde_json::to_string(&response)
            .map_err(|e| tracing::error!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_document_reports_load_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json").display().to_string();

        let mut worker = ListingWorker::new();
        let response = worker.handle_message(WorkerMessage::load_listings(path));
        assert!(matches!(response, WorkerResponse::LoadFailed { .. }));
    }

    #[test]
    fn payload_round_trip_loads_listings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"listings": [{{"id": "x", "currentPrice": 5}}]}}"#).unwrap();

        let message = WorkerMessage::load_listings(file.path().display().to_string());
        let payload = serde_json::to_string(&message).unwrap();

        let mut worker = ListingWorker::new();
        let encoded = worker.handle_payload(&payload).unwrap();
        let response: WorkerResponse = serde_json::from_str(&encoded).unwrap();

        match response {
            WorkerResponse::ListingsLoaded { listings } => {
                assert_eq!(listings.len(), 1);
                assert_eq!(listings[0].id, "x");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn garbage_payload_answers_load_failed() {
        let mut worker = ListingWorker::new();
        let encoded = worker.handle_payload("not json").unwrap();
        let response: WorkerResponse = serde_json::from_str(&encoded).unwrap();
        assert!(matches!(response, WorkerResponse::LoadFailed { .. }));
    }
}
