use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::action::DeliveryAction;

// Maximum timestamp wins; among equal timestamps the first map key wins, so
// the result is deterministic for any insertion order.
pub fn last_action(actions: &BTreeMap<String, DeliveryAction>) -> Option<&DeliveryAction> {
    let mut latest: Option<&DeliveryAction> = None;

    for action in actions.values() {
        match latest {
            Some(current) if action.timestamp <= current.timestamp => {}
            _ => latest = Some(action),
        }
    }

    latest
}

pub fn format_timestamp(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = timestamp.date_naive();
    let today = now.date_naive();

    if day == today {
        format!("today {}", timestamp.format("%H:%M"))
    } else if Some(day) == today.succ_opt() {
        format!("tomorrow {}", timestamp.format("%H:%M"))
    } else if Some(day) == today.pred_opt() {
        format!("yesterday {}", timestamp.format("%H:%M"))
    } else {
        timestamp.format("%d/%m/%Y %H:%M").to_string()
    }
}
