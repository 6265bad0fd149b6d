use contracts::domain::a002_trash_order::TrashOrder;
use contracts::shared::changes::ChangeKind;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::repository;
use crate::domain::a001_order::lifecycle::TRASH_TABLE;
use crate::domain::a001_order::repository as order_repository;
use crate::shared::cache::ORDERS_TABLE;
use crate::shared::changes;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::shared::logger;

fn not_found(id: i64) -> anyhow::Error {
    ApiError::NotFound(format!("Trashed order {} not found", id)).into()
}

pub async fn list_all() -> anyhow::Result<Vec<TrashOrder>> {
    repository::list_all().await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<TrashOrder>> {
    repository::get_by_id(id).await
}

/// Put one trash row back into the orders table.
///
/// The original id is reused when it is still free; otherwise SQLite assigns
/// a new one. Returns the id of the restored order.
async fn restore_txn(txn: &DatabaseTransaction, item: &TrashOrder) -> anyhow::Result<i64> {
    let mut order = item.to_restored_order();
    if order_repository::exists_txn(txn, order.id).await? {
        tracing::warn!(
            "Order id {} is taken, restoring trash row {} under a new id",
            order.id,
            item.id
        );
        order.id = 0;
    }

    let order_id = order_repository::insert_txn(txn, &order).await?;
    repository::delete_txn(txn, item.id).await?;
    Ok(order_id)
}

/// Trashed → active
pub async fn restore(id: i64) -> anyhow::Result<i64> {
    let txn = get_connection().begin().await?;
    let item = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let order_id = restore_txn(&txn, &item).await?;
    txn.commit().await?;

    changes::publish(TRASH_TABLE, ChangeKind::Delete, vec![id]);
    changes::publish(ORDERS_TABLE, ChangeKind::Insert, vec![order_id]);
    logger::log(
        logger::CATEGORY_LIFECYCLE,
        &format!("Order {} ({}) restored from trash", order_id, item.name),
    );

    Ok(order_id)
}

/// Restore every trash row in one transaction; returns the restored order ids
pub async fn restore_all() -> anyhow::Result<Vec<i64>> {
    let txn = get_connection().begin().await?;
    let items = repository::list_all_txn(&txn).await?;

    let mut order_ids = Vec::with_capacity(items.len());
    for item in &items {
        order_ids.push(restore_txn(&txn, item).await?);
    }
    txn.commit().await?;

    if !items.is_empty() {
        changes::publish(
            TRASH_TABLE,
            ChangeKind::Delete,
            items.iter().map(|i| i.id).collect(),
        );
        changes::publish(ORDERS_TABLE, ChangeKind::Insert, order_ids.clone());
        logger::log(
            logger::CATEGORY_LIFECYCLE,
            &format!("{} order(s) restored from trash", order_ids.len()),
        );
    }

    Ok(order_ids)
}

/// Permanently delete one trash row
pub async fn purge(id: i64) -> anyhow::Result<()> {
    if !repository::delete(id).await? {
        return Err(not_found(id));
    }

    changes::publish(TRASH_TABLE, ChangeKind::Delete, vec![id]);
    logger::log(
        logger::CATEGORY_LIFECYCLE,
        &format!("Trashed order {} deleted permanently", id),
    );
    Ok(())
}

/// Empty the trash; returns the number of rows removed
pub async fn empty() -> anyhow::Result<usize> {
    let txn = get_connection().begin().await?;
    let ids = repository::delete_all_txn(&txn).await?;
    txn.commit().await?;

    if !ids.is_empty() {
        let removed = ids.len();
        changes::publish(TRASH_TABLE, ChangeKind::Delete, ids);
        logger::log(
            logger::CATEGORY_LIFECYCLE,
            &format!("Trash emptied, {} order(s) deleted permanently", removed),
        );
        return Ok(removed);
    }
    Ok(0)
}

pub async fn count() -> anyhow::Result<u64> {
    repository::count().await
}
