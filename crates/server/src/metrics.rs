use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static PAGES_RENDERED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "enrollment_pages_rendered_total",
        "Total HTML pages rendered"
    )
    .expect("register pages_rendered_total")
});

pub static WRITES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "enrollment_writes_total",
        "Successful store writes by entity and operation",
        &["entity", "op"]
    )
    .expect("register writes_total")
});

pub static DUPLICATES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "enrollment_duplicates_total",
        "Creates rejected because the roll number or course code was taken"
    )
    .expect("register duplicates_total")
});

pub static STORE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "enrollment_store_failures_total",
        "Requests that failed with a store error and were rolled back"
    )
    .expect("register store_failures_total")
});

pub fn record_write(entity: &str, op: &str) {
    WRITES_TOTAL.with_label_values(&[entity, op]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
