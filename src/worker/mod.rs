//! Background worker for loading the listings document.
//!
//! Reading and normalizing the document happens off the plugin thread so the
//! UI keeps accepting input while `loading` is set. The Zellij worker shim in
//! `main.rs` forwards raw payloads to [`ListingWorker`].
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Message processing logic

pub mod handler;
pub mod messages;

pub use handler::ListingWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
