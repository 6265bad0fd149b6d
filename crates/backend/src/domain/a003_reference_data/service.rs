use contracts::domain::common::{ReferenceItem, ReferenceItemDto, ReferenceKind};
use contracts::shared::changes::ChangeKind;
use sea_orm::TransactionTrait;

use super::repository;
use crate::domain::a001_order::lifecycle::TRASH_TABLE;
use crate::shared::cache::ORDERS_TABLE;
use crate::shared::changes;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::shared::logger;

/// Orders and trashed orders whose folder moved with a rename or delete
fn publish_refiled([orders, trashed]: [Vec<i64>; 2]) {
    if !orders.is_empty() {
        changes::publish(ORDERS_TABLE, ChangeKind::Update, orders);
    }
    if !trashed.is_empty() {
        changes::publish(TRASH_TABLE, ChangeKind::Update, trashed);
    }
}

fn not_found(kind: ReferenceKind, id: i64) -> anyhow::Error {
    ApiError::NotFound(format!("{} {} not found", kind.display_name(), id)).into()
}

pub async fn list(kind: ReferenceKind) -> anyhow::Result<Vec<ReferenceItem>> {
    repository::list(kind).await
}

/// Names only, in list order
pub async fn names(kind: ReferenceKind) -> anyhow::Result<Vec<String>> {
    Ok(repository::list(kind)
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect())
}

/// Whether an item with this name exists (trimmed, case-insensitive)
pub async fn contains_name(kind: ReferenceKind, name: &str) -> anyhow::Result<bool> {
    let wanted = name.trim().to_lowercase();
    Ok(repository::list(kind)
        .await?
        .iter()
        .any(|item| item.name.trim().to_lowercase() == wanted))
}

pub async fn create(kind: ReferenceKind, dto: ReferenceItemDto) -> anyhow::Result<ReferenceItem> {
    let existing = repository::list(kind).await?;
    let name = dto.validate_against(kind, &existing, None)?;

    let id = repository::insert(kind, &name).await?;
    let item = repository::get_by_id(kind, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("{} {} vanished after insert", kind.display_name(), id))?;

    changes::publish(kind.table_name(), ChangeKind::Insert, vec![id]);
    logger::log(
        logger::CATEGORY_REFERENCE,
        &format!("{} \"{}\" added", kind.display_name(), name),
    );
    Ok(item)
}

pub async fn rename(
    kind: ReferenceKind,
    id: i64,
    dto: ReferenceItemDto,
) -> anyhow::Result<ReferenceItem> {
    let existing = repository::list(kind).await?;
    let previous = existing
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| not_found(kind, id))?;
    let name = dto.validate_against(kind, &existing, Some(id))?;

    let txn = get_connection().begin().await?;
    if !repository::rename_txn(&txn, kind, id, &name).await? {
        return Err(not_found(kind, id));
    }
    let filed = if kind == ReferenceKind::BatchFolder {
        Some(repository::repoint_batch_folder_txn(&txn, &previous.name, Some(name.as_str())).await?)
    } else {
        None
    };
    txn.commit().await?;

    changes::publish(kind.table_name(), ChangeKind::Update, vec![id]);
    if let Some(filed) = filed {
        publish_refiled(filed);
    }
    logger::log(
        logger::CATEGORY_REFERENCE,
        &format!(
            "{} \"{}\" renamed to \"{}\"",
            kind.display_name(),
            previous.name,
            name
        ),
    );
    Ok(ReferenceItem { name, ..previous })
}

pub async fn delete(kind: ReferenceKind, id: i64) -> anyhow::Result<()> {
    let item = repository::get_by_id(kind, id)
        .await?
        .ok_or_else(|| not_found(kind, id))?;
    let txn = get_connection().begin().await?;
    if !repository::delete_txn(&txn, kind, id).await? {
        return Err(not_found(kind, id));
    }
    let filed = if kind == ReferenceKind::BatchFolder {
        Some(repository::repoint_batch_folder_txn(&txn, &item.name, None).await?)
    } else {
        None
    };
    txn.commit().await?;

    changes::publish(kind.table_name(), ChangeKind::Delete, vec![id]);
    if let Some(filed) = filed {
        publish_refiled(filed);
    }
    logger::log(
        logger::CATEGORY_REFERENCE,
        &format!("{} \"{}\" deleted", kind.display_name(), item.name),
    );
    Ok(())
}
