use contracts::domain::a001_order::{
    BatchAssignDto, CustomerUpdateDto, Order, OrderCaptureDto, OrderUpdateDto,
};
use contracts::domain::common::{ReferenceKind, ValidationError};
use contracts::enums::PaymentStatus;
use contracts::shared::changes::ChangeKind;
use sea_orm::TransactionTrait;

use super::repository;
use crate::domain::a003_reference_data;
use crate::shared::cache::ORDERS_TABLE;
use crate::shared::changes;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::shared::logger;

fn not_found(id: i64) -> anyhow::Error {
    ApiError::NotFound(format!("Order {} not found", id)).into()
}

/// Store a capture form: one order per line, in one transaction
pub async fn create_batch(dto: OrderCaptureDto) -> anyhow::Result<Vec<i64>> {
    dto.validate()?;
    ensure_batch_folder_exists(dto.batch_folder.as_deref()).await?;

    let mut orders = dto.to_orders();
    for order in &mut orders {
        order.validate()?;
        order.before_write();
    }

    let ids = repository::insert_many(&orders).await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Insert, ids.clone());
    logger::log(
        logger::CATEGORY_ORDERS,
        &format!("{} order(s) created for {}", ids.len(), dto.customer.name.trim()),
    );

    Ok(ids)
}

/// Capture form submitted from the public order page
pub async fn create_public(dto: OrderCaptureDto) -> anyhow::Result<Vec<i64>> {
    create_batch(dto.into_public()).await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Order>> {
    repository::get_by_id(id).await
}

pub async fn list_defective() -> anyhow::Result<Vec<Order>> {
    repository::list_defective().await
}

/// Edit one order
pub async fn update(id: i64, dto: OrderUpdateDto) -> anyhow::Result<Order> {
    dto.validate()?;
    ensure_batch_folder_exists(dto.batch_folder.as_deref()).await?;

    let mut order = repository::get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    order.update(&dto);
    order.validate()?;
    order.before_write();
    repository::update(&order).await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Update, vec![id]);
    Ok(order)
}

pub async fn set_payment_status(id: i64, status: PaymentStatus) -> anyhow::Result<()> {
    if !repository::set_payment_status(id, status).await? {
        return Err(not_found(id));
    }
    changes::publish(ORDERS_TABLE, ChangeKind::Update, vec![id]);
    Ok(())
}

/// Rewrite the customer fields of every order (active or defective) of one customer.
/// Returns the updated order ids.
pub async fn update_customer(dto: CustomerUpdateDto) -> anyhow::Result<Vec<i64>> {
    dto.validate()?;

    let txn = get_connection().begin().await?;
    let orders = repository::find_by_customer_txn(&txn, &dto.key, true).await?;
    if orders.is_empty() {
        return Err(ApiError::NotFound(format!("Customer '{}' not found", dto.key.name)).into());
    }

    let mut ids = Vec::with_capacity(orders.len());
    for mut order in orders {
        order.apply_customer(&dto.customer);
        order.before_write();
        repository::update_txn(&txn, &order).await?;
        ids.push(order.id);
    }
    txn.commit().await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Update, ids.clone());
    logger::log(
        logger::CATEGORY_ORDERS,
        &format!("Customer '{}' edited ({} order(s))", dto.key.name, ids.len()),
    );
    Ok(ids)
}

/// Assign or clear batch tags on several orders; returns the number updated
pub async fn assign_batch(dto: BatchAssignDto) -> anyhow::Result<u64> {
    if dto.order_ids.is_empty() {
        return Err(ValidationError::Invalid("Select at least one order".into()).into());
    }
    let batch = normalize(dto.batch);
    let batch_folder = normalize(dto.batch_folder);
    ensure_batch_folder_exists(batch_folder.as_deref()).await?;

    let updated = repository::assign_batch(&dto.order_ids, batch, batch_folder.clone()).await?;
    if updated > 0 {
        changes::publish(ORDERS_TABLE, ChangeKind::Update, dto.order_ids.clone());
    }
    logger::log(
        logger::CATEGORY_ORDERS,
        &format!(
            "{} order(s) assigned to batch folder {}",
            updated,
            batch_folder.as_deref().unwrap_or("(none)")
        ),
    );
    Ok(updated)
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn ensure_batch_folder_exists(batch_folder: Option<&str>) -> anyhow::Result<()> {
    let Some(folder) = batch_folder.map(str::trim).filter(|f| !f.is_empty()) else {
        return Ok(());
    };
    if !a003_reference_data::service::contains_name(ReferenceKind::BatchFolder, folder).await? {
        return Err(ValidationError::Invalid(format!("Unknown batch folder \"{}\"", folder)).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Some("  Batch 2 ".into())), Some("Batch 2".into()));
        assert_eq!(normalize(Some("   ".into())), None);
        assert_eq!(normalize(None), None);
    }
}
