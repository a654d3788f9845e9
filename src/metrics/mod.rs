//! Command and movement counters.
//!
//! Counters live in a crate-local registry; [`gather_text`] renders them in
//! the Prometheus text exposition format.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::{errors::ServiceError, models::MovementDirection};

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
    static ref COMMANDS_TOTAL: IntCounterVec = registered(
        IntCounterVec::new(
            Opts::new(
                "depot_stock_commands_total",
                "Total number of successfully executed commands"
            ),
            &["command"]
        )
        .expect("metric can be created")
    );
    static ref COMMAND_FAILURES: IntCounterVec = registered(
        IntCounterVec::new(
            Opts::new(
                "depot_stock_command_failures_total",
                "Total number of rejected or failed commands"
            ),
            &["command", "error_type"]
        )
        .expect("metric can be created")
    );
    static ref MOVEMENTS_TOTAL: IntCounterVec = registered(
        IntCounterVec::new(
            Opts::new(
                "depot_stock_movements_total",
                "Total number of applied stock movements"
            ),
            &["direction"]
        )
        .expect("metric can be created")
    );
}

fn registered(counter: IntCounterVec) -> IntCounterVec {
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric can be registered");
    counter
}

pub fn record_success(command: &str) {
    COMMANDS_TOTAL.with_label_values(&[command]).inc();
}

pub fn record_failure(command: &str, error: &ServiceError) {
    COMMAND_FAILURES
        .with_label_values(&[command, error.kind()])
        .inc();
}

pub fn record_movement(direction: MovementDirection) {
    let label = direction.to_string();
    MOVEMENTS_TOTAL.with_label_values(&[label.as_str()]).inc();
}

pub fn command_count(command: &str) -> u64 {
    COMMANDS_TOTAL.with_label_values(&[command]).get()
}

pub fn failure_count(command: &str, error_type: &str) -> u64 {
    COMMAND_FAILURES
        .with_label_values(&[command, error_type])
        .get()
}

pub fn gather_text() -> Result<String, ServiceError> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| ServiceError::InternalError(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| ServiceError::InternalError(format!("Metrics are not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_render() {
        let before = command_count("metrics_test");
        record_success("metrics_test");
        record_success("metrics_test");
        assert_eq!(command_count("metrics_test"), before + 2);

        let err = ServiceError::ValidationError("bad".into());
        record_failure("metrics_test", &err);
        assert!(failure_count("metrics_test", "validation_error") >= 1);

        record_movement(MovementDirection::Inbound);
        let text = gather_text().unwrap();
        assert!(text.contains("depot_stock_commands_total"));
        assert!(text.contains("direction=\"inbound\""));
    }
}
