//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → RotatingFile
//! ```
//!
//! Traces land in `~/.local/share/zellij/homescout/homescout-otlp.json`, one
//! OTLP JSON batch per line. The file rotates at 10 MB and keeps three
//! backups.
//!
//! The level comes from the `trace_level` plugin option (default `"info"`),
//! using `EnvFilter` directive syntax such as `homescout=debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation for the plugin and the worker
//! - `exporter`: Span exporter and OTLP JSON encoding
//! - `rotating`: Size-rotated line file

mod exporter;
pub mod init;
mod rotating;

pub use init::{init_tracing, init_worker_tracing};
pub use rotating::RotatingFile;
