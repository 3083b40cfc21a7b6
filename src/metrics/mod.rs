/*!
 * # Metrics Module
 *
 * Prometheus counters for the registry's write path. Every create command
 * reports one of three outcomes per entity:
 *
 * - `created`: the row (and any subtype row) was committed
 * - `rejected`: input failed validation before any write
 * - `failed`: the store refused the write (constraint or connection error)
 *
 * Counters live in a crate-local registry and are rendered in the
 * Prometheus text format by [`render`].
 */

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::error;

lazy_static! {
    pub static ref REGISTRY: Registry =
        Registry::new_custom(Some("agro_registry".to_string()), None)
            .expect("registry can be created");
    static ref RECORDS_CREATED: IntCounterVec = register(IntCounterVec::new(
        Opts::new("records_created_total", "Total number of records created"),
        &["entity"]
    ));
    static ref RECORDS_REJECTED: IntCounterVec = register(IntCounterVec::new(
        Opts::new(
            "records_rejected_total",
            "Total number of create requests rejected by validation"
        ),
        &["entity"]
    ));
    static ref RECORDS_FAILED: IntCounterVec = register(IntCounterVec::new(
        Opts::new(
            "records_failed_total",
            "Total number of create requests refused by the database"
        ),
        &["entity"]
    ));
}

fn register(counter: prometheus::Result<IntCounterVec>) -> IntCounterVec {
    let counter = counter.expect("metric can be created");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric can be registered");
    counter
}

pub fn record_created(entity: &str) {
    RECORDS_CREATED.with_label_values(&[entity]).inc();
}

pub fn record_rejected(entity: &str) {
    RECORDS_REJECTED.with_label_values(&[entity]).inc();
}

pub fn record_failed(entity: &str) {
    RECORDS_FAILED.with_label_values(&[entity]).inc();
}

/// Current value of the `created` counter for one entity.
pub fn created_count(entity: &str) -> u64 {
    RECORDS_CREATED.with_label_values(&[entity]).get()
}

/// Renders every registered metric in the Prometheus text format.
pub fn render() -> String {
    // Touch the counters so they are registered even before the first write.
    lazy_static::initialize(&RECORDS_CREATED);
    lazy_static::initialize(&RECORDS_REJECTED);
    lazy_static::initialize(&RECORDS_FAILED);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_labelled_by_entity() {
        let before = created_count("metrics_test_entity");
        record_created("metrics_test_entity");
        record_rejected("metrics_test_entity");
        assert_eq!(created_count("metrics_test_entity"), before + 1);

        let text = render();
        assert!(text.contains("agro_registry_records_created_total"));
        assert!(text.contains("entity=\"metrics_test_entity\""));
        assert!(text.contains("agro_registry_records_rejected_total"));
    }
}
