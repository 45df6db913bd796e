//! Observability for the catalog search core.
//!
//! This crate provides:
//! - `LoggingConfig` / `init` - Installs the `tracing` subscriber
//! - `RequestId` - Unique request identifier for log correlation
//! - `operation_span` - Span wrapping one catalog operation

mod logging;
mod span;

pub use logging::*;
pub use span::*;
