//! Logging and tracing setup for the zeaz-admin client.
//!
//! - **Logging**: human-readable or JSON output via `tracing-subscriber`,
//!   filtered by `RUST_LOG` or the configured level.
//! - **Tracing**: per-operation spans with a trace ID that is also sent to
//!   the backend as `X-Request-Id` for correlation.

pub mod logging;
pub mod tracing_setup;
