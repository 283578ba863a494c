use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::AppError;
use crate::models::order::Order;
use crate::store::{OrderPatch, OrderStore};

#[derive(Default)]
pub struct InMemoryStore {
    orders: DashMap<String, Order>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(orders: Vec<Order>) -> Self {
        let store = Self::new();
        for order in orders {
            store.orders.insert(order.id.clone(), order);
        }
        store
    }

    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.get(order_id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn orders_for_client(&self, client_id: &str) -> Result<Vec<Order>, AppError> {
        let orders = self
            .orders
            .iter()
            .filter(|entry| entry.value().client_id == client_id)
            .map(|entry| entry.value().clone())
            .collect();

        Ok(orders)
    }

    async fn apply_patch(&self, order_id: &str, patch: OrderPatch) -> Result<(), AppError> {
        let mut order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", order_id)))?;

        patch.apply_to(&mut order);
        Ok(())
    }
}
