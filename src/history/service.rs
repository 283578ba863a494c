use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::action::DeliveryAction;
use crate::models::order::{Order, OrderStatus};
use crate::state::AppState;
use crate::store::OrderPatch;

pub const ACTION_ACCEPTED: &str = "package accepted for delivery";
pub const ACTION_DELIVERED: &str = "package delivered";

pub async fn refresh_history(state: &AppState, client_id: &str) -> Vec<Order> {
    let start = Instant::now();

    match state.store.orders_for_client(client_id).await {
        Ok(orders) => {
            let elapsed = start.elapsed().as_secs_f64();
            state
                .metrics
                .fetch_latency_seconds
                .with_label_values(&["success"])
                .observe(elapsed);
            state
                .metrics
                .history_fetches_total
                .with_label_values(&["success"])
                .inc();

            state.orders.retain(|_, order| order.client_id != client_id);
            for order in &orders {
                state.orders.insert(order.id.clone(), order.clone());
            }
            state.metrics.orders_cached.set(state.orders.len() as i64);

            sorted_newest_first(orders)
        }
        Err(err) => {
            let elapsed = start.elapsed().as_secs_f64();
            state
                .metrics
                .fetch_latency_seconds
                .with_label_values(&["error"])
                .observe(elapsed);
            state
                .metrics
                .history_fetches_total
                .with_label_values(&["error"])
                .inc();

            // No retry: serve the last-known snapshot, possibly empty.
            warn!(client_id = %client_id, error = %err, "history fetch failed; serving cached orders");
            cached_for_client(state, client_id)
        }
    }
}

pub async fn accept_order(state: &AppState, order_id: &str) -> Result<Order, AppError> {
    if !state.orders.contains_key(order_id) {
        return Err(AppError::NotFound(format!("order {} not found", order_id)));
    }

    let patch = OrderPatch {
        accepted: Some(true),
        ..Default::default()
    }
    .with_action(
        Uuid::new_v4().to_string(),
        DeliveryAction::new(ACTION_ACCEPTED, Utc::now()),
    );

    let order = write_through(state, order_id, "accept", patch).await?;
    info!(order_id = %order_id, "order accepted");
    Ok(order)
}

pub async fn confirm_delivery(
    state: &AppState,
    order_id: &str,
    entered_code: &str,
) -> Result<Order, AppError> {
    let stored_code = state
        .orders
        .get(order_id)
        .map(|entry| entry.value().code.clone())
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", order_id)))?;

    // Exact, case-sensitive comparison; a mismatch never reaches the store.
    if entered_code != stored_code {
        warn!(order_id = %order_id, "delivery confirmation rejected: code mismatch");
        return Err(AppError::InvalidCode);
    }

    let patch = OrderPatch {
        status: Some(OrderStatus::Received),
        ..Default::default()
    }
    .with_action(
        Uuid::new_v4().to_string(),
        DeliveryAction::new(ACTION_DELIVERED, Utc::now()),
    );

    let order = write_through(state, order_id, "confirm", patch).await?;
    info!(order_id = %order_id, "delivery confirmed");
    Ok(order)
}

// Remote commit happens-before local visibility: the cached copy is patched
// only once the store write has succeeded, never optimistically.
async fn write_through(
    state: &AppState,
    order_id: &str,
    operation: &str,
    patch: OrderPatch,
) -> Result<Order, AppError> {
    if let Err(err) = state.store.apply_patch(order_id, patch.clone()).await {
        state
            .metrics
            .store_writes_total
            .with_label_values(&[operation, "error"])
            .inc();
        warn!(order_id = %order_id, operation = %operation, error = %err, "store write failed; local state unchanged");
        return Err(err);
    }

    state
        .metrics
        .store_writes_total
        .with_label_values(&[operation, "success"])
        .inc();

    let mut order = state
        .orders
        .get_mut(order_id)
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", order_id)))?;
    patch.apply_to(&mut order);

    Ok(order.clone())
}

fn cached_for_client(state: &AppState, client_id: &str) -> Vec<Order> {
    let orders = state
        .orders
        .iter()
        .filter(|entry| entry.value().client_id == client_id)
        .map(|entry| entry.value().clone())
        .collect();

    sorted_newest_first(orders)
}

fn sorted_newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| {
        b.creation_date
            .cmp(&a.creation_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    orders
}
