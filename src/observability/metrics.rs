use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub history_fetches_total: IntCounterVec,
    pub store_writes_total: IntCounterVec,
    pub fetch_latency_seconds: HistogramVec,
    pub orders_cached: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let history_fetches_total = IntCounterVec::new(
            Opts::new("history_fetches_total", "Total history fetches by outcome"),
            &["outcome"],
        )
        .expect("valid history_fetches_total metric");

        let store_writes_total = IntCounterVec::new(
            Opts::new(
                "store_writes_total",
                "Total store writes by operation and outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("valid store_writes_total metric");

        let fetch_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "fetch_latency_seconds",
                "Latency of history fetches in seconds",
            ),
            &["outcome"],
        )
        .expect("valid fetch_latency_seconds metric");

        let orders_cached = IntGauge::new("orders_cached", "Current number of cached orders")
            .expect("valid orders_cached metric");

        registry
            .register(Box::new(history_fetches_total.clone()))
            .expect("register history_fetches_total");
        registry
            .register(Box::new(store_writes_total.clone()))
            .expect("register store_writes_total");
        registry
            .register(Box::new(fetch_latency_seconds.clone()))
            .expect("register fetch_latency_seconds");
        registry
            .register(Box::new(orders_cached.clone()))
            .expect("register orders_cached");

        Self {
            registry,
            history_fetches_total,
            store_writes_total,
            fetch_latency_seconds,
            orders_cached,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
