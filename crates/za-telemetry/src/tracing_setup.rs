use uuid::Uuid;

/// Header carrying the trace ID on outgoing backend requests.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate an OpenTelemetry-compatible trace ID (32 hex characters).
pub fn generate_trace_id() -> String {
    // A UUID without hyphens is exactly 32 hex chars (128 bits).
    Uuid::new_v4().as_simple().to_string()
}

/// Generate a span ID (16 hex characters).
pub fn generate_span_id() -> String {
    Uuid::new_v4().as_simple().to_string()[..16].to_string()
}

/// Create a named span for one client operation, returning the span and its
/// trace ID so the caller can forward it as [`REQUEST_ID_HEADER`].
pub fn create_operation_span(operation: &str, resource: &str) -> (tracing::Span, String) {
    let trace_id = generate_trace_id();
    let span_id = generate_span_id();
    let span = tracing::info_span!(
        "operation",
        trace_id = %trace_id,
        span_id = %span_id,
        operation = %operation,
        resource = %resource,
    );
    (span, trace_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
