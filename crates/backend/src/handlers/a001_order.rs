use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_order::{
    BatchAssignDto, CustomerKey, CustomerUpdateDto, DefectiveNoteDto, Order, OrderCaptureDto,
    OrderUpdateDto, PaymentStatusDto,
};
use serde_json::json;

use crate::domain::a001_order::{lifecycle, service};
use crate::shared::cache;
use crate::shared::error::{ApiError, ApiResult};

/// GET /api/orders
pub async fn list_active() -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(cache::active_orders().await?))
}

/// POST /api/orders
pub async fn create(
    Json(dto): Json<OrderCaptureDto>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let ids = service::create_batch(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "ids": ids }))))
}

/// GET /api/orders/:id
pub async fn get_by_id(Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Order {} not found", id)))
}

/// PUT /api/orders/:id
pub async fn update(Path(id): Path<i64>, Json(dto): Json<OrderUpdateDto>) -> ApiResult<Json<Order>> {
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/orders/:id
pub async fn delete(Path(id): Path<i64>) -> ApiResult<StatusCode> {
    lifecycle::purge_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/orders/:id/payment-status
pub async fn set_payment_status(
    Path(id): Path<i64>,
    Json(dto): Json<PaymentStatusDto>,
) -> ApiResult<StatusCode> {
    service::set_payment_status(id, dto.payment_status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/orders/:id/trash
pub async fn move_to_trash(Path(id): Path<i64>) -> ApiResult<Json<serde_json::Value>> {
    let trash_id = lifecycle::move_to_trash(id).await?;
    Ok(Json(json!({ "trash_id": trash_id })))
}

/// POST /api/orders/:id/defective
pub async fn mark_defective(
    Path(id): Path<i64>,
    Json(dto): Json<DefectiveNoteDto>,
) -> ApiResult<Json<Order>> {
    Ok(Json(lifecycle::mark_defective(id, dto.normalized()).await?))
}

/// POST /api/orders/batch-folder
pub async fn assign_batch(Json(dto): Json<BatchAssignDto>) -> ApiResult<Json<serde_json::Value>> {
    let updated = service::assign_batch(dto).await?;
    Ok(Json(json!({ "updated": updated })))
}

/// PUT /api/customers
pub async fn update_customer(
    Json(dto): Json<CustomerUpdateDto>,
) -> ApiResult<Json<serde_json::Value>> {
    let ids = service::update_customer(dto).await?;
    Ok(Json(json!({ "ids": ids })))
}

/// POST /api/customers/trash
pub async fn move_customer_to_trash(
    Json(key): Json<CustomerKey>,
) -> ApiResult<Json<serde_json::Value>> {
    let trash_ids = lifecycle::move_customer_to_trash(&key).await?;
    Ok(Json(json!({ "trash_ids": trash_ids })))
}

/// GET /api/defective
pub async fn list_defective() -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(service::list_defective().await?))
}

/// DELETE /api/defective/:id
pub async fn delete_defective(Path(id): Path<i64>) -> ApiResult<StatusCode> {
    lifecycle::purge_defective(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/defective/:id/note
pub async fn edit_defective_note(
    Path(id): Path<i64>,
    Json(dto): Json<DefectiveNoteDto>,
) -> ApiResult<Json<Order>> {
    Ok(Json(lifecycle::edit_defective_note(id, dto.normalized()).await?))
}

/// POST /api/defective/:id/restore
pub async fn restore_defective(Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    Ok(Json(lifecycle::clear_defective(id).await?))
}
