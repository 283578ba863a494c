pub mod memory;
pub mod remote;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;
use crate::models::action::DeliveryAction;
use crate::models::order::{Order, OrderStatus};

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_actions: Option<BTreeMap<String, DeliveryAction>>,
}

impl OrderPatch {
    pub fn with_action(mut self, key: String, action: DeliveryAction) -> Self {
        self.delivery_actions
            .get_or_insert_with(BTreeMap::new)
            .insert(key, action);
        self
    }

    // Delivery actions are merged, not replaced: the audit log is append-only.
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(accepted) = self.accepted {
            order.accepted = accepted;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(actions) = &self.delivery_actions {
            for (key, action) in actions {
                order.delivery_actions.insert(key.clone(), action.clone());
            }
        }
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn orders_for_client(&self, client_id: &str) -> Result<Vec<Order>, AppError>;

    async fn apply_patch(&self, order_id: &str, patch: OrderPatch) -> Result<(), AppError>;
}
