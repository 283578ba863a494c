use crate::models::order::{Bucket, Order, OrderStatus};

pub fn bucket_of(order: &Order) -> Bucket {
    if order.status == OrderStatus::Received {
        Bucket::Completed
    } else if order.accepted {
        Bucket::InProgress
    } else {
        Bucket::New
    }
}

pub fn classify(orders: &[Order], bucket: Bucket) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| bucket_of(order) == bucket)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{bucket_of, classify};
    use crate::models::order::{Bucket, Order, OrderStatus};

    fn order(id: &str, accepted: bool, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            client_id: "client@example.com".to_string(),
            status,
            accepted,
            creation_date: Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
            arrival_date: Utc.with_ymd_and_hms(2026, 1, 14, 8, 0, 0).unwrap(),
            delivery_actions: Default::default(),
            code: "0000".to_string(),
            order_name: None,
            client_name: None,
            address: None,
            icon: None,
            weight: None,
            sensitive: false,
        }
    }

    #[test]
    fn buckets_partition_every_order_exactly_once() {
        let orders = vec![
            order("a", false, OrderStatus::Processing),
            order("b", true, OrderStatus::Processing),
            order("c", true, OrderStatus::Sent),
            order("d", true, OrderStatus::Received),
            order("e", false, OrderStatus::Received),
            order("f", false, OrderStatus::Sent),
        ];

        let new = classify(&orders, Bucket::New);
        let in_progress = classify(&orders, Bucket::InProgress);
        let completed = classify(&orders, Bucket::Completed);

        assert_eq!(new.len() + in_progress.len() + completed.len(), orders.len());

        let ids = |bucket: &[Order]| bucket.iter().map(|o| o.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&new), vec!["a", "f"]);
        assert_eq!(ids(&in_progress), vec!["b", "c"]);
        assert_eq!(ids(&completed), vec!["d", "e"]);
    }

    #[test]
    fn unaccepted_order_is_new() {
        let o = order("42", false, OrderStatus::Processing);
        assert_eq!(bucket_of(&o), Bucket::New);
    }

    #[test]
    fn received_order_is_completed_even_if_never_accepted() {
        let o = order("42", false, OrderStatus::Received);
        assert_eq!(bucket_of(&o), Bucket::Completed);
    }

    #[test]
    fn classify_preserves_relative_order() {
        let orders = vec![
            order("z", false, OrderStatus::Processing),
            order("m", true, OrderStatus::Sent),
            order("a", false, OrderStatus::Sent),
        ];

        let new = classify(&orders, Bucket::New);
        let ids: Vec<_> = new.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn classify_empty_list_is_empty() {
        assert!(classify(&[], Bucket::New).is_empty());
        assert!(classify(&[], Bucket::InProgress).is_empty());
        assert!(classify(&[], Bucket::Completed).is_empty());
    }
}
