use std::sync::Arc;

use dashmap::DashMap;

use crate::models::order::Order;
use crate::observability::metrics::Metrics;
use crate::store::OrderStore;

// The order map is a write-through cache over the remote store: it is only
// updated after a remote commit succeeds, and served stale when a fetch fails.
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub orders: DashMap<String, Order>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            orders: DashMap::new(),
            metrics: Metrics::new(),
        }
    }
}
