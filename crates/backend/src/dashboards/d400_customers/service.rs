use anyhow::Result;
use contracts::dashboards::d400_customers::{CustomerFilter, CustomerPage, FilterOptions};
use contracts::domain::a001_order::{group_customers, Order};
use contracts::enums::compare_sizes;
use contracts::enums::size::sort_sizes;
use contracts::shared::pagination::{paginate, PAGE_SIZE};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::shared::cache;

/// Customer dashboard page for the given filter
pub async fn get_customer_page(filter: CustomerFilter) -> Result<CustomerPage> {
    let orders = cache::active_orders().await?;
    Ok(build_customer_page(&orders, &filter))
}

pub async fn get_filter_options() -> Result<FilterOptions> {
    let orders = cache::active_orders().await?;
    Ok(build_filter_options(&orders))
}

/// Group, filter, sort and paginate active orders
pub fn build_customer_page(orders: &[Order], filter: &CustomerFilter) -> CustomerPage {
    let mut customers: Vec<_> = group_customers(orders)
        .into_iter()
        .filter(|customer| filter.matches(customer))
        .collect();

    for customer in &mut customers {
        customer.orders.sort_by(compare_order_lines);
    }

    let (page_items, info) = paginate(&customers, filter.page.unwrap_or(1), PAGE_SIZE);

    CustomerPage {
        customers: page_items,
        page: info.page,
        page_size: info.page_size,
        total_customers: info.total_items,
        total_pages: info.total_pages,
    }
}

/// Design, then color, then size rank
pub fn compare_order_lines(a: &Order, b: &Order) -> Ordering {
    a.design
        .cmp(&b.design)
        .then_with(|| a.color.cmp(&b.color))
        .then_with(|| compare_sizes(&a.size, &b.size))
}

/// Distinct values present in the orders, for the filter dropdowns
pub fn build_filter_options(orders: &[Order]) -> FilterOptions {
    let colors: BTreeSet<&str> = orders.iter().map(|o| o.color.as_str()).collect();
    let designs: BTreeSet<&str> = orders.iter().map(|o| o.design.as_str()).collect();
    let sizes: BTreeSet<&str> = orders.iter().map(|o| o.size.as_str()).collect();
    let batch_folders: BTreeSet<&str> = orders
        .iter()
        .filter_map(|o| o.batch_folder.as_deref())
        .collect();

    let mut sizes: Vec<String> = sizes.into_iter().map(String::from).collect();
    sort_sizes(&mut sizes);

    FilterOptions {
        colors: colors.into_iter().map(String::from).collect(),
        sizes,
        designs: designs.into_iter().map(String::from).collect(),
        batch_folders: batch_folders.into_iter().map(String::from).collect(),
    }
}
