use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::history::actions::{format_timestamp, last_action};
use crate::history::classify::{bucket_of, classify};
use crate::history::search::search;
use crate::history::service::{accept_order, confirm_delivery, refresh_history};
use crate::models::order::{Bucket, Order, OrderStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients/:client_id/orders", get(list_history))
        .route("/orders/:id/accept", post(accept))
        .route("/orders/:id/confirm", post(confirm))
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub bucket: Option<Bucket>,
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct ConfirmRequest {
    pub code: String,
}

// Response view of an order; deliberately omits the confirmation code.
#[derive(Serialize)]
pub struct OrderView {
    pub id: String,
    pub client_id: String,
    pub status: OrderStatus,
    pub accepted: bool,
    pub bucket: Bucket,
    pub creation_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub sensitive: bool,
    pub last_action: Option<LastActionView>,
}

#[derive(Serialize)]
pub struct LastActionView {
    pub action: String,
    pub timestamp: String,
}

impl OrderView {
    pub fn from_order(order: &Order, now: DateTime<Utc>) -> Self {
        let last = last_action(&order.delivery_actions).map(|action| LastActionView {
            action: action.action.clone(),
            timestamp: format_timestamp(action.timestamp, now),
        });

        Self {
            id: order.id.clone(),
            client_id: order.client_id.clone(),
            status: order.status,
            accepted: order.accepted,
            bucket: bucket_of(order),
            creation_date: order.creation_date,
            arrival_date: order.arrival_date,
            order_name: order.order_name.clone(),
            client_name: order.client_name.clone(),
            address: order.address.clone(),
            icon: order.icon.clone(),
            weight: order.weight,
            sensitive: order.sensitive,
            last_action: last,
        }
    }
}

async fn list_history(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Json<Vec<OrderView>> {
    let orders = refresh_history(&state, &client_id).await;

    let orders = match params.bucket {
        Some(bucket) => classify(&orders, bucket),
        None => orders,
    };

    // The query narrows within the active bucket, never across it.
    let orders = match params.q.as_deref() {
        Some(query) => search(&orders, query),
        None => orders,
    };

    let now = Utc::now();
    Json(
        orders
            .iter()
            .map(|order| OrderView::from_order(order, now))
            .collect(),
    )
}

async fn accept(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, AppError> {
    let order = accept_order(&state, &id).await?;
    Ok(Json(OrderView::from_order(&order, Utc::now())))
}

async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmRequest>,
) -> Result<Json<OrderView>, AppError> {
    if payload.code.trim().is_empty() {
        return Err(AppError::BadRequest("code cannot be empty".to_string()));
    }

    let order = confirm_delivery(&state, &id, &payload.code).await?;
    Ok(Json(OrderView::from_order(&order, Utc::now())))
}
