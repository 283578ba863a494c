use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::action::DeliveryAction;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Processing,
    Sent,
    Received,
}

impl OrderStatus {
    // Unknown status strings from upstream documents fall back to Processing
    // so a malformed order still classifies instead of failing the fetch.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "sent" => OrderStatus::Sent,
            "received" => OrderStatus::Received,
            _ => OrderStatus::Processing,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    New,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub client_id: String,
    #[serde(default, deserialize_with = "status_lossy")]
    pub status: OrderStatus,
    #[serde(default)]
    pub accepted: bool,
    pub creation_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
    #[serde(default)]
    pub delivery_actions: BTreeMap<String, DeliveryAction>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub order_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub sensitive: bool,
}

fn status_lossy<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(OrderStatus::parse_lossy(&raw))
}
