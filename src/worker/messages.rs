//! Plugin ↔ worker protocol.
//!
//! Both directions travel as JSON over Zellij's plugin messages. Requests
//! carry the requesting span's ids so worker spans join the plugin's trace.

use crate::domain::Listing;
use serde::{Deserialize, Serialize};

/// Trace and parent span ids, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Ids of the current span, or `None` without an OpenTelemetry layer.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span = otel_context.span();
        let ids = span.span_context();
        if !ids.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", ids.trace_id()),
            parent_span_id: format!("{:016x}", ids.span_id()),
        })
    }
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read, parse and normalize the listings document at `path`.
    LoadListings {
        /// Sandbox path of the listings document.
        path: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// A load request for `path`, stamped with the caller's trace context.
    #[must_use]
    pub fn load_listings(path: String) -> Self {
        Self::LoadListings {
            path,
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadListings { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The document was read; `listings` is the full normalized set.
    ListingsLoaded {
        listings: Vec<Listing>,
    },

    /// The document could not be read or parsed at all. The plugin treats
    /// this as an empty listing set.
    LoadFailed {
        /// Human-readable error message.
        message: String,
    },
}
