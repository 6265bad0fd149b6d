use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_trash_order::TrashOrder;
use serde_json::json;

use crate::domain::a002_trash_order::service;
use crate::shared::error::ApiResult;

/// GET /api/trash
pub async fn list_all() -> ApiResult<Json<Vec<TrashOrder>>> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/trash/:id/restore
pub async fn restore(Path(id): Path<i64>) -> ApiResult<Json<serde_json::Value>> {
    let order_id = service::restore(id).await?;
    Ok(Json(json!({ "order_id": order_id })))
}

/// POST /api/trash/restore-all
pub async fn restore_all() -> ApiResult<Json<serde_json::Value>> {
    let order_ids = service::restore_all().await?;
    Ok(Json(json!({ "order_ids": order_ids })))
}

/// DELETE /api/trash/:id
pub async fn delete(Path(id): Path<i64>) -> ApiResult<StatusCode> {
    service::purge(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/trash
pub async fn empty() -> ApiResult<Json<serde_json::Value>> {
    let removed = service::empty().await?;
    Ok(Json(json!({ "removed": removed })))
}
