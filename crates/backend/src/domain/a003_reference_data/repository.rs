//! Colors, designs and batch folders share one row shape, so they share one
//! repository keyed by [`ReferenceKind`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::domain::common::{ReferenceItem, ReferenceKind};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseTransaction, QueryResult, Statement};

use crate::shared::data::db::get_connection;

fn item_from_row(row: &QueryResult) -> Result<ReferenceItem> {
    let created_at: String = row.try_get("", "created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    Ok(ReferenceItem {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        created_at,
    })
}

/// All items of a kind, sorted by name (case-insensitive)
pub async fn list(kind: ReferenceKind) -> Result<Vec<ReferenceItem>> {
    let rows = get_connection()
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT id, name, created_at FROM {} ORDER BY name COLLATE NOCASE, id",
                kind.table_name()
            ),
        ))
        .await?;

    rows.iter().map(item_from_row).collect()
}

pub async fn get_by_id(kind: ReferenceKind, id: i64) -> Result<Option<ReferenceItem>> {
    let result = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT id, name, created_at FROM {} WHERE id = ?",
                kind.table_name()
            ),
            [id.into()],
        ))
        .await?;

    result.as_ref().map(item_from_row).transpose()
}

pub async fn insert(kind: ReferenceKind, name: &str) -> Result<i64> {
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "INSERT INTO {} (name, created_at) VALUES (?, ?)",
                kind.table_name()
            ),
            [name.into(), Utc::now().to_rfc3339().into()],
        ))
        .await
        .with_context(|| format!("Failed to insert into {}", kind.table_name()))?;

    Ok(result.last_insert_id() as i64)
}

pub async fn rename_txn(
    txn: &DatabaseTransaction,
    kind: ReferenceKind,
    id: i64,
    name: &str,
) -> Result<bool> {
    let result = txn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("UPDATE {} SET name = ? WHERE id = ?", kind.table_name()),
            [name.into(), id.into()],
        ))
        .await
        .with_context(|| format!("Failed to update {}", kind.table_name()))?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_txn(txn: &DatabaseTransaction, kind: ReferenceKind, id: i64) -> Result<bool> {
    let result = txn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("DELETE FROM {} WHERE id = ?", kind.table_name()),
            [id.into()],
        ))
        .await
        .with_context(|| format!("Failed to delete from {}", kind.table_name()))?;

    Ok(result.rows_affected() > 0)
}

/// Tables whose rows carry a `batch_folder` name
const FOLDER_TABLES: [&str; 2] = ["orders", "trash_orders"];

/// Points every order and trashed order filed under `from` at `to`
/// (`None` clears the folder). Returns the affected ids per table,
/// in `FOLDER_TABLES` order.
pub async fn repoint_batch_folder_txn(
    txn: &DatabaseTransaction,
    from: &str,
    to: Option<&str>,
) -> Result<[Vec<i64>; 2]> {
    let mut affected: [Vec<i64>; 2] = Default::default();
    for (table, ids) in FOLDER_TABLES.iter().zip(affected.iter_mut()) {
        let rows = txn
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                format!("SELECT id FROM {} WHERE batch_folder = ? COLLATE NOCASE", table),
                [from.into()],
            ))
            .await?;
        for row in &rows {
            ids.push(row.try_get("", "id")?);
        }
        if ids.is_empty() {
            continue;
        }

        let value: sea_orm::Value = to.map(str::to_string).into();
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "UPDATE {} SET batch_folder = ? WHERE batch_folder = ? COLLATE NOCASE",
                table
            ),
            [value, from.into()],
        ))
        .await
        .with_context(|| format!("Failed to update batch folders in {}", table))?;
    }
    Ok(affected)
}
