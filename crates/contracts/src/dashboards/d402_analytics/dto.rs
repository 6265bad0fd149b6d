use serde::{Deserialize, Serialize};

/// Slice of the design pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignShare {
    pub design: String,
    pub quantity: i64,
    /// Share of all ordered items, 0..=100
    pub percentage: f64,
}

/// Row of the top-customers ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub name: String,
    pub phone: String,
    pub facebook: String,
    pub address: String,
    pub order_count: usize,
    pub total_quantity: i64,
    pub total_amount: f64,
}
