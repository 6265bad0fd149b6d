use axum::extract::Query;
use axum::Json;
use contracts::shared::logger::LogEntry;
use serde::Deserialize;
use serde_json::json;

use crate::shared::error::ApiResult;
use crate::shared::logger;

const DEFAULT_LIMIT: u64 = 500;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LogQuery {
    pub category: Option<String>,
    pub limit: Option<u64>,
}

/// GET /api/logs
pub async fn list_all(Query(query): Query<LogQuery>) -> ApiResult<Json<Vec<LogEntry>>> {
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    let logs = logger::repository::list_logs(category, query.limit.unwrap_or(DEFAULT_LIMIT)).await?;
    Ok(Json(logs))
}

/// DELETE /api/logs
pub async fn clear_all() -> ApiResult<Json<serde_json::Value>> {
    let removed = logger::repository::clear_all_logs().await?;
    tracing::info!("Activity log cleared ({} records)", removed);
    Ok(Json(json!({ "removed": removed })))
}
