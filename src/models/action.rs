use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryAction {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_action: Option<String>,
}

impl DeliveryAction {
    pub fn new(action: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            action: action.into(),
            timestamp,
            notification_action: None,
        }
    }
}
