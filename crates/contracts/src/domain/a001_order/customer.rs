use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregate::{CustomerFieldsDto, Order};
use crate::domain::common::{require_text, ValidationError};

/// Identity tuple of a customer. Values compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CustomerKey {
    pub name: String,
    pub phone: String,
    pub facebook: String,
    pub address: String,
}

impl CustomerKey {
    pub fn matches(&self, order: &Order) -> bool {
        self.name == order.name
            && self.phone == order.phone
            && self.facebook == order.facebook
            && self.address == order.address
    }
}

/// Customer reconstructed from its orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub key: CustomerKey,
    /// Chapter of the first order seen for this customer
    pub chapter: String,
    pub orders: Vec<Order>,
}

impl Customer {
    pub fn total_quantity(&self) -> i64 {
        self.orders.iter().map(|o| o.quantity as i64).sum()
    }

    pub fn total_amount(&self) -> f64 {
        self.orders.iter().map(Order::amount).sum()
    }
}

/// Group orders into customers by [`CustomerKey`].
///
/// Customers keep the order in which they were first seen, and each customer's
/// orders keep their input order.
pub fn group_customers(orders: &[Order]) -> Vec<Customer> {
    let mut index: HashMap<CustomerKey, usize> = HashMap::new();
    let mut customers: Vec<Customer> = Vec::new();

    for order in orders {
        let key = order.customer_key();
        match index.get(&key) {
            Some(&pos) => customers[pos].orders.push(order.clone()),
            None => {
                index.insert(key.clone(), customers.len());
                customers.push(Customer {
                    key,
                    chapter: order.chapter.clone(),
                    orders: vec![order.clone()],
                });
            }
        }
    }

    customers
}

/// Edit the customer fields of every order belonging to `key`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CustomerUpdateDto {
    pub key: CustomerKey,
    pub customer: CustomerFieldsDto,
}

impl CustomerUpdateDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.customer.name, "Name").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::aggregate::OrderLineDto;
    use crate::enums::PaymentStatus;

    fn order(name: &str, phone: &str, facebook: &str, address: &str, color: &str) -> Order {
        Order::new_for_insert(
            &CustomerFieldsDto {
                name: name.into(),
                phone: phone.into(),
                facebook: facebook.into(),
                chapter: "Alpha".into(),
                address: address.into(),
            },
            &OrderLineDto {
                color: color.into(),
                size: "M".into(),
                design: "Logo".into(),
                ..Default::default()
            },
            PaymentStatus::Pending,
            None,
            None,
        )
    }

    #[test]
    fn test_identical_tuples_group_together() {
        let orders = vec![
            order("Ana", "1", "fb.ana", "Manila", "Black"),
            order("Ben", "2", "fb.ben", "Cebu", "White"),
            order("Ana", "1", "fb.ana", "Manila", "White"),
        ];
        let customers = group_customers(&orders);
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].key.name, "Ana");
        assert_eq!(customers[0].orders.len(), 2);
        assert_eq!(customers[0].orders[1].color, "White");
        assert_eq!(customers[1].key.name, "Ben");
    }

    #[test]
    fn test_changing_any_key_field_splits_customer() {
        let base = order("Ana", "1", "fb.ana", "Manila", "Black");
        let variants = vec![
            order("Ana B", "1", "fb.ana", "Manila", "Black"),
            order("Ana", "9", "fb.ana", "Manila", "Black"),
            order("Ana", "1", "fb.other", "Manila", "Black"),
            order("Ana", "1", "fb.ana", "Davao", "Black"),
        ];
        for variant in variants {
            let customers = group_customers(&[base.clone(), variant]);
            assert_eq!(customers.len(), 2);
        }
    }

    #[test]
    fn test_chapter_is_not_part_of_identity() {
        let first = order("Ana", "1", "fb.ana", "Manila", "Black");
        let mut second = first.clone();
        second.chapter = "Beta".into();
        let customers = group_customers(&[first, second]);
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].chapter, "Alpha");
    }

    #[test]
    fn test_totals() {
        let mut a = order("Ana", "1", "", "", "Black");
        a.quantity = 2;
        a.price = 300.0;
        let mut b = order("Ana", "1", "", "", "White");
        b.price = 250.0;
        let customer = group_customers(&[a, b]).remove(0);
        assert_eq!(customer.total_quantity(), 3);
        assert_eq!(customer.total_amount(), 850.0);
        assert!(customer.key.matches(&customer.orders[0]));
    }
}
