use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of row change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Notification that rows of a table changed.
///
/// Clients treat every event as "refetch this table"; nothing relies on
/// delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
    pub ids: Vec<i64>,
    pub at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: &str, kind: ChangeKind, ids: Vec<i64>) -> Self {
        Self {
            table: table.to_string(),
            kind,
            ids,
            at: Utc::now(),
        }
    }
}
