use serde::{Deserialize, Serialize};

use crate::domain::a001_order::{Customer, Order};

/// Sentinel value of a dropdown filter meaning "no restriction"
pub const ALL: &str = "All";

/// Dashboard filter, parsed from the query string
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CustomerFilter {
    /// Case-insensitive substring of the customer name
    pub name: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub design: Option<String>,
    pub batch_folder: Option<String>,
    /// 1-based page number
    pub page: Option<usize>,
}

impl CustomerFilter {
    /// Whether a customer passes the filter.
    ///
    /// Dropdown filters need at least one of the customer's orders to match
    /// exactly; a matching customer is kept with all of their orders.
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(needle) = active_value(&self.name) {
            if !customer
                .key
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        let checks: [(&Option<String>, fn(&Order) -> Option<&str>); 4] = [
            (&self.color, |o| Some(o.color.as_str())),
            (&self.size, |o| Some(o.size.as_str())),
            (&self.design, |o| Some(o.design.as_str())),
            (&self.batch_folder, |o| o.batch_folder.as_deref()),
        ];

        checks.iter().all(|(wanted, field)| match dropdown_value(wanted) {
            None => true,
            Some(wanted) => customer
                .orders
                .iter()
                .any(|order| field(order) == Some(wanted)),
        })
    }
}

fn active_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn dropdown_value(value: &Option<String>) -> Option<&str> {
    active_value(value).filter(|v| *v != ALL)
}

/// One page of the customer dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub page: usize,
    pub page_size: usize,
    pub total_customers: usize,
    pub total_pages: usize,
}

/// Distinct values present in active orders, for filter dropdowns
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilterOptions {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub designs: Vec<String>,
    pub batch_folders: Vec<String>,
}
