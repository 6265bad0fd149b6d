//! Lifecycle moves of rows in the orders table.
//!
//! Every move first asks [`OrderLifecycle::apply`] whether it is legal, then
//! writes. Moves that touch two tables run in one transaction and publish
//! change events only after commit.

use chrono::Utc;
use contracts::domain::a001_order::{
    CustomerKey, LifecycleAction, Order, OrderLifecycle, Transition,
};
use contracts::domain::a002_trash_order::TrashOrder;
use contracts::shared::changes::ChangeKind;
use sea_orm::TransactionTrait;

use super::repository;
use crate::domain::a002_trash_order::repository as trash_repository;
use crate::shared::cache::ORDERS_TABLE;
use crate::shared::changes;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::shared::logger;

pub const TRASH_TABLE: &str = "trash_orders";

fn not_found(id: i64) -> anyhow::Error {
    ApiError::NotFound(format!("Order {} not found", id)).into()
}

/// Expected next state of `order` after `action`, or the lifecycle error
fn check(order: &Order, action: &LifecycleAction) -> anyhow::Result<Transition> {
    Ok(order.lifecycle().apply(action)?)
}

/// Active order → trash. Returns the trash row id.
pub async fn move_to_trash(id: i64) -> anyhow::Result<i64> {
    let txn = get_connection().begin().await?;

    let order = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    check(&order, &LifecycleAction::MoveToTrash)?;

    let trash_row = TrashOrder::from_order(&order, Utc::now());
    let trash_id = trash_repository::insert_txn(&txn, &trash_row).await?;
    repository::delete_txn(&txn, id).await?;
    txn.commit().await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Delete, vec![id]);
    changes::publish(TRASH_TABLE, ChangeKind::Insert, vec![trash_id]);
    logger::log(
        logger::CATEGORY_LIFECYCLE,
        &format!("Order {} ({}) moved to trash", id, order.name),
    );

    Ok(trash_id)
}

/// Move every active order of a customer to trash, all or nothing.
/// Returns the trash row ids.
pub async fn move_customer_to_trash(key: &CustomerKey) -> anyhow::Result<Vec<i64>> {
    let txn = get_connection().begin().await?;

    let orders = repository::find_active_by_customer_txn(&txn, key).await?;
    if orders.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Customer '{}' has no active orders",
            key.name
        ))
        .into());
    }

    let deleted_at = Utc::now();
    let mut order_ids = Vec::with_capacity(orders.len());
    let mut trash_ids = Vec::with_capacity(orders.len());
    for order in &orders {
        check(order, &LifecycleAction::MoveToTrash)?;
        let trash_row = TrashOrder::from_order(order, deleted_at);
        trash_ids.push(trash_repository::insert_txn(&txn, &trash_row).await?);
        repository::delete_txn(&txn, order.id).await?;
        order_ids.push(order.id);
    }
    txn.commit().await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Delete, order_ids);
    changes::publish(TRASH_TABLE, ChangeKind::Insert, trash_ids.clone());
    logger::log(
        logger::CATEGORY_LIFECYCLE,
        &format!("{} order(s) of {} moved to trash", trash_ids.len(), key.name),
    );

    Ok(trash_ids)
}

/// Flag an order as defective. Re-marking a defective order only updates the note.
pub async fn mark_defective(id: i64, note: Option<String>) -> anyhow::Result<Order> {
    let action = LifecycleAction::MarkDefective { note: note.clone() };
    set_defective_state(id, &action, true, note).await
}

/// Change the note of a defective order
pub async fn edit_defective_note(id: i64, note: Option<String>) -> anyhow::Result<Order> {
    let action = LifecycleAction::EditDefectiveNote { note: note.clone() };
    set_defective_state(id, &action, true, note).await
}

/// Defective → active; flag and note are cleared
pub async fn clear_defective(id: i64) -> anyhow::Result<Order> {
    set_defective_state(id, &LifecycleAction::ClearDefective, false, None).await
}

async fn set_defective_state(
    id: i64,
    action: &LifecycleAction,
    is_defective: bool,
    note: Option<String>,
) -> anyhow::Result<Order> {
    let txn = get_connection().begin().await?;

    let mut order = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    check(&order, action)?;

    order.is_defective = is_defective;
    order.defective_note = note;
    order.before_write();
    repository::update_txn(&txn, &order).await?;
    txn.commit().await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Update, vec![id]);
    logger::log(
        logger::CATEGORY_LIFECYCLE,
        &format!("Order {}: {}", id, action.name()),
    );

    Ok(order)
}

/// Permanently delete an active or defective order
pub async fn purge_order(id: i64) -> anyhow::Result<()> {
    purge(id, &LifecycleAction::Purge).await
}

/// Permanently delete an order from the defective list; active orders are refused
pub async fn purge_defective(id: i64) -> anyhow::Result<()> {
    purge(id, &LifecycleAction::PurgeDefective).await
}

async fn purge(id: i64, action: &LifecycleAction) -> anyhow::Result<()> {
    let txn = get_connection().begin().await?;

    let order = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let from: OrderLifecycle = order.lifecycle();
    check(&order, action)?;

    if !repository::delete_txn(&txn, id).await? {
        return Err(not_found(id));
    }
    txn.commit().await?;

    changes::publish(ORDERS_TABLE, ChangeKind::Delete, vec![id]);
    logger::log(
        logger::CATEGORY_LIFECYCLE,
        &format!("Order {} ({}, {}) deleted permanently", id, order.name, from),
    );
    Ok(())
}
