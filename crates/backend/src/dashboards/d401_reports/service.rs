use anyhow::Result;
use contracts::dashboards::d401_reports::{Report, ReportKind, ReportTable};
use contracts::domain::a001_order::{group_customers, Order};
use contracts::enums::{compare_sizes, PaymentStatus};
use std::collections::BTreeMap;

use crate::dashboards::d400_customers::service::compare_order_lines;
use crate::shared::cache;
use crate::shared::format::format_amount;

const QUANTITY_COLUMNS: [&str; 3] = ["Color", "Size", "Quantity"];
const INVOICE_COLUMNS: [&str; 6] = ["Design", "Color", "Size", "Quantity", "Price", "Amount"];
const SHIPPING_COLUMNS: [&str; 4] = ["Name", "Phone", "Address", "Items"];

/// Build a report from the active orders
pub async fn get_report(kind: ReportKind) -> Result<Report> {
    let orders = cache::active_orders().await?;
    Ok(build_report(kind, &orders))
}

pub fn build_report(kind: ReportKind, orders: &[Order]) -> Report {
    let tables = match kind {
        ReportKind::Total => vec![build_total_table(orders)],
        ReportKind::Designs => build_design_tables(orders),
        ReportKind::Invoices => build_invoice_tables(orders),
        ReportKind::Shipping => vec![build_shipping_table(orders)],
    };
    Report {
        kind,
        title: kind.title().to_string(),
        tables,
    }
}

/// color → (size → quantity), colors alphabetical
type ColorSizeCounts<'a> = BTreeMap<&'a str, Vec<(&'a str, i64)>>;

fn count_by_color_size<'a>(orders: impl Iterator<Item = &'a Order>) -> ColorSizeCounts<'a> {
    let mut counts: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
    for order in orders {
        *counts
            .entry(order.color.as_str())
            .or_default()
            .entry(order.size.as_str())
            .or_default() += order.quantity as i64;
    }

    counts
        .into_iter()
        .map(|(color, sizes)| {
            let mut sizes: Vec<(&str, i64)> = sizes.into_iter().collect();
            sizes.sort_by(|a, b| compare_sizes(a.0, b.0));
            (color, sizes)
        })
        .collect()
}

/// Rows for one color → size block with a divider row per color; returns the block total
fn push_color_size_rows(table: &mut ReportTable, counts: &ColorSizeCounts<'_>) -> i64 {
    let mut overall = 0;
    for (color, sizes) in counts {
        let mut color_total = 0;
        for (size, quantity) in sizes {
            table.push_row([color.to_string(), size.to_string(), quantity.to_string()]);
            color_total += quantity;
        }
        table.push_row([
            format!("{} Total", color),
            String::new(),
            color_total.to_string(),
        ]);
        overall += color_total;
    }
    overall
}

/// "Total Ordered Tshirts": every color with its sizes, then the overall total
pub fn build_total_table(orders: &[Order]) -> ReportTable {
    let mut table = ReportTable::new(ReportKind::Total.title(), &QUANTITY_COLUMNS);
    let overall = push_color_size_rows(&mut table, &count_by_color_size(orders.iter()));
    table.push_row(["Overall Total".to_string(), String::new(), overall.to_string()]);
    table
}

/// One color → size table per design, then a per-design summary
pub fn build_design_tables(orders: &[Order]) -> Vec<ReportTable> {
    let mut by_design: BTreeMap<&str, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        by_design.entry(order.design.as_str()).or_default().push(order);
    }

    let mut tables = Vec::with_capacity(by_design.len() + 1);
    let mut summary = ReportTable::new("Overall Total", &["Design", "Quantity"]);
    let mut overall = 0;

    for (design, design_orders) in &by_design {
        let mut table = ReportTable::new(*design, &QUANTITY_COLUMNS);
        let counts = count_by_color_size(design_orders.iter().copied());
        let total = push_color_size_rows(&mut table, &counts);
        table.push_row([format!("{} Total", design), String::new(), total.to_string()]);
        tables.push(table);

        summary.push_row([design.to_string(), total.to_string()]);
        overall += total;
    }

    summary.push_row(["Overall Total".to_string(), overall.to_string()]);
    tables.push(summary);
    tables
}

/// Least advanced status among the lines: pending < partially paid < fully paid
pub fn payment_summary(orders: &[Order]) -> PaymentStatus {
    orders
        .iter()
        .map(|o| o.payment_status)
        .min()
        .unwrap_or_default()
}

/// One invoice per customer, in the order customers were first seen
pub fn build_invoice_tables(orders: &[Order]) -> Vec<ReportTable> {
    group_customers(orders)
        .into_iter()
        .map(|mut customer| {
            customer.orders.sort_by(compare_order_lines);

            let mut title = customer.key.name.clone();
            if !customer.key.phone.is_empty() {
                title.push_str(&format!(" ({})", customer.key.phone));
            }

            let mut table = ReportTable::new(title, &INVOICE_COLUMNS);
            for order in &customer.orders {
                table.push_row([
                    order.design.clone(),
                    order.color.clone(),
                    order.size.clone(),
                    order.quantity.to_string(),
                    format_amount(order.price),
                    format_amount(order.amount()),
                ]);
            }
            table.push_row([
                "Total".to_string(),
                String::new(),
                String::new(),
                customer.total_quantity().to_string(),
                String::new(),
                format_amount(customer.total_amount()),
            ]);
            table.push_row([
                "Payment".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                payment_summary(&customer.orders).label().to_string(),
            ]);
            table
        })
        .collect()
}

/// Shipping list, customers alphabetical by name
pub fn build_shipping_table(orders: &[Order]) -> ReportTable {
    let mut customers = group_customers(orders);
    customers.sort_by(|a, b| {
        a.key
            .name
            .to_lowercase()
            .cmp(&b.key.name.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });

    let mut table = ReportTable::new(ReportKind::Shipping.title(), &SHIPPING_COLUMNS);
    for customer in &customers {
        table.push_row([
            customer.key.name.clone(),
            customer.key.phone.clone(),
            customer.key.address.clone(),
            customer.total_quantity().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_order::{CustomerFieldsDto, OrderLineDto};

    fn order(
        name: &str,
        color: &str,
        size: &str,
        design: &str,
        quantity: i32,
        price: f64,
    ) -> Order {
        Order::new_for_insert(
            &CustomerFieldsDto {
                name: name.into(),
                phone: format!("{}-phone", name),
                address: format!("{} street", name),
                ..Default::default()
            },
            &OrderLineDto {
                color: color.into(),
                size: size.into(),
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

    fn rows(table: &ReportTable) -> Vec<Vec<&str>> {
        table
            .rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_total_black_m_m_l() {
        let orders = vec![
            order("Ana", "Black", "M", "Logo", 1, 0.0),
            order("Ben", "Black", "M", "Logo", 1, 0.0),
            order("Ana", "Black", "L", "Seal", 1, 0.0),
        ];
        let table = build_total_table(&orders);
        assert_eq!(table.title, "Total Ordered Tshirts");
        assert_eq!(table.columns, vec!["Color", "Size", "Quantity"]);
        assert_eq!(
            rows(&table),
            vec![
                vec!["Black", "M", "2"],
                vec!["Black", "L", "1"],
                vec!["Black Total", "", "3"],
                vec!["Overall Total", "", "3"],
            ]
        );
    }

    #[test]
    fn test_total_counts_quantity_and_orders_colors() {
        let orders = vec![
            order("Ana", "White", "XL", "Logo", 2, 0.0),
            order("Ana", "Black", "XS", "Logo", 3, 0.0),
            order("Ana", "White", "S", "Logo", 1, 0.0),
        ];
        let table = build_total_table(&orders);
        assert_eq!(
            rows(&table),
            vec![
                vec!["Black", "XS", "3"],
                vec!["Black Total", "", "3"],
                vec!["White", "S", "1"],
                vec!["White", "XL", "2"],
                vec!["White Total", "", "3"],
                vec!["Overall Total", "", "6"],
            ]
        );
    }

    #[test]
    fn test_design_breakdown() {
        let orders = vec![
            order("Ana", "Black", "M", "Seal", 1, 0.0),
            order("Ana", "Black", "M", "Logo", 2, 0.0),
            order("Ben", "White", "L", "Logo", 1, 0.0),
        ];
        let tables = build_design_tables(&orders);
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].title, "Logo");
        assert_eq!(
            rows(&tables[0]),
            vec![
                vec!["Black", "M", "2"],
                vec!["Black Total", "", "2"],
                vec!["White", "L", "1"],
                vec!["White Total", "", "1"],
                vec!["Logo Total", "", "3"],
            ]
        );
        assert_eq!(tables[1].title, "Seal");
        assert_eq!(
            rows(&tables[2]),
            vec![vec!["Logo", "3"], vec!["Seal", "1"], vec!["Overall Total", "4"]]
        );
    }

    #[test]
    fn test_invoice_totals_and_payment_summary() {
        let mut paid = order("Ana", "Black", "M", "Logo", 2, 350.0);
        paid.payment_status = PaymentStatus::FullyPaid;
        let mut partial = order("Ana", "White", "L", "Seal", 1, 400.0);
        partial.payment_status = PaymentStatus::PartiallyPaid;
        let ben = order("Ben", "Black", "S", "Logo", 1, 1250.0);

        let tables = build_invoice_tables(&[paid, ben, partial]);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].title, "Ana (Ana-phone)");
        assert_eq!(
            tables[0].columns,
            vec!["Design", "Color", "Size", "Quantity", "Price", "Amount"]
        );
        assert_eq!(
            rows(&tables[0]),
            vec![
                vec!["Logo", "Black", "M", "2", "350.00", "700.00"],
                vec!["Seal", "White", "L", "1", "400.00", "400.00"],
                vec!["Total", "", "", "3", "", "1,100.00"],
                vec!["Payment", "", "", "", "", "partially paid"],
            ]
        );
        assert_eq!(tables[1].rows[1][5], "1,250.00");
        assert_eq!(tables[1].rows[2][5], "pending");
    }

    #[test]
    fn test_shipping_list_alphabetical() {
        let orders = vec![
            order("carla", "Black", "M", "Logo", 1, 0.0),
            order("Ben", "Black", "M", "Logo", 2, 0.0),
            order("Ben", "White", "M", "Logo", 1, 0.0),
            order("Ana", "Black", "M", "Logo", 1, 0.0),
        ];
        let table = build_shipping_table(&orders);
        assert_eq!(table.columns, vec!["Name", "Phone", "Address", "Items"]);
        assert_eq!(
            rows(&table),
            vec![
                vec!["Ana", "Ana-phone", "Ana street", "1"],
                vec!["Ben", "Ben-phone", "Ben street", "3"],
                vec!["carla", "carla-phone", "carla street", "1"],
            ]
        );
    }

    #[test]
    fn test_empty_reports() {
        let report = build_report(ReportKind::Total, &[]);
        assert_eq!(rows(&report.tables[0]), vec![vec!["Overall Total", "", "0"]]);
        assert!(build_report(ReportKind::Invoices, &[]).tables.is_empty());
        assert_eq!(payment_summary(&[]), PaymentStatus::Pending);
    }
}
