use crate::models::order::Order;

pub fn search(orders: &[Order], query: &str) -> Vec<Order> {
    if query.is_empty() {
        return orders.to_vec();
    }

    let needle = query.to_lowercase();
    orders
        .iter()
        .filter(|order| order.id.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
