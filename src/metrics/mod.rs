// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order creation throughput
// - Status transitions (accepted and rejected)
// - Failed requests by operation and error kind
// - Request latency per operation
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub order_transitions: IntCounterVec,
    pub order_transitions_rejected: IntCounterVec,
    pub requests_failed: IntCounterVec,
    pub request_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new("orders_created_total", "Total orders created")?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_transitions = IntCounterVec::new(
            Opts::new("order_transitions_total", "Accepted order status transitions"),
            &["status"],
        )?;
        registry.register(Box::new(order_transitions.clone()))?;

        let order_transitions_rejected = IntCounterVec::new(
            Opts::new(
                "order_transitions_rejected_total",
                "Status transitions refused by lifecycle rules, by current status",
            ),
            &["status"],
        )?;
        registry.register(Box::new(order_transitions_rejected.clone()))?;

        let requests_failed = IntCounterVec::new(
            Opts::new("order_requests_failed_total", "Failed order requests"),
            &["operation", "kind"],
        )?;
        registry.register(Box::new(requests_failed.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new("order_request_duration_seconds", "Order request duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_transitions,
            order_transitions_rejected,
            requests_failed,
            request_duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
