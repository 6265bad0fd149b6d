use anyhow::Result;
use contracts::dashboards::d402_analytics::{DesignShare, TopCustomer};
use contracts::domain::a001_order::{group_customers, Order};
use std::collections::HashMap;

use crate::shared::cache;

pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Design distribution over every order in the orders table (active and defective)
pub async fn get_design_distribution() -> Result<Vec<DesignShare>> {
    let orders = cache::all_orders().await?;
    Ok(design_distribution(&orders))
}

pub async fn get_top_customers(limit: usize) -> Result<Vec<TopCustomer>> {
    let orders = cache::all_orders().await?;
    Ok(top_customers(&orders, limit))
}

/// Ordered items per design with their share, largest first then by name
pub fn design_distribution(orders: &[Order]) -> Vec<DesignShare> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for order in orders {
        *counts.entry(order.design.as_str()).or_default() += order.quantity as i64;
    }
    let total: i64 = counts.values().sum();

    let mut shares: Vec<DesignShare> = counts
        .into_iter()
        .map(|(design, quantity)| DesignShare {
            design: design.to_string(),
            quantity,
            percentage: if total > 0 {
                quantity as f64 * 100.0 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    shares.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.design.cmp(&b.design))
    });
    shares
}

/// Customers ranked by quantity, then amount, then name
pub fn top_customers(orders: &[Order], limit: usize) -> Vec<TopCustomer> {
    let mut ranked: Vec<TopCustomer> = group_customers(orders)
        .into_iter()
        .map(|customer| TopCustomer {
            order_count: customer.orders.len(),
            total_quantity: customer.total_quantity(),
            total_amount: customer.total_amount(),
            name: customer.key.name,
            phone: customer.key.phone,
            facebook: customer.key.facebook,
            address: customer.key.address,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| b.total_amount.total_cmp(&a.total_amount))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_order::{CustomerFieldsDto, OrderLineDto};
    use contracts::enums::PaymentStatus;

    fn order(name: &str, design: &str, quantity: i32, price: f64) -> Order {
        Order::new_for_insert(
            &CustomerFieldsDto {
                name: name.into(),
                ..Default::default()
            },
            &OrderLineDto {
                color: "Black".into(),
                size: "M".into(),
                design: design.into(),
                quantity: Some(quantity),
                price: Some(price),
                ..Default::default()
            },
            PaymentStatus::Pending,
            None,
            None,
        )
    }

    #[test]
    fn test_design_distribution() {
        let shares = design_distribution(&[
            order("Ana", "Seal", 1, 0.0),
            order("Ben", "Logo", 2, 0.0),
            order("Ana", "Logo", 1, 0.0),
            order("Carla", "Arch", 1, 0.0),
        ]);
        let names: Vec<&str> = shares.iter().map(|s| s.design.as_str()).collect();
        assert_eq!(names, vec!["Logo", "Arch", "Seal"]);
        assert_eq!(shares[0].quantity, 3);
        assert!((shares[0].percentage - 60.0).abs() < 1e-9);
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_design_distribution_empty() {
        assert!(design_distribution(&[]).is_empty());
    }

    #[test]
    fn test_top_customers_ranking() {
        let orders = vec![
            order("Ana", "Logo", 2, 100.0),
            order("Ben", "Logo", 2, 300.0),
            order("Carla", "Logo", 1, 900.0),
            order("Ana", "Seal", 1, 100.0),
            order("Dan", "Logo", 2, 300.0),
        ];
        let top = top_customers(&orders, DEFAULT_TOP_LIMIT);
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        // Ana: 3 items; Ben and Dan tie on quantity and amount, name decides
        assert_eq!(names, vec!["Ana", "Ben", "Dan", "Carla"]);
        assert_eq!(top[0].order_count, 2);
        assert_eq!(top[0].total_amount, 300.0);

        assert_eq!(top_customers(&orders, 2).len(), 2);
    }
}
