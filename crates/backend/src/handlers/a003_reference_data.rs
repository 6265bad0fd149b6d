//! Handlers shared by the colors, designs and batch folder routers; the
//! router state selects the list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::common::{ReferenceItem, ReferenceItemDto, ReferenceKind};

use crate::domain::a003_reference_data::service;
use crate::shared::error::ApiResult;

/// GET /api/{colors|designs|batch-folders}
pub async fn list(State(kind): State<ReferenceKind>) -> ApiResult<Json<Vec<ReferenceItem>>> {
    Ok(Json(service::list(kind).await?))
}

/// POST /api/{colors|designs|batch-folders}
pub async fn create(
    State(kind): State<ReferenceKind>,
    Json(dto): Json<ReferenceItemDto>,
) -> ApiResult<(StatusCode, Json<ReferenceItem>)> {
    let item = service::create(kind, dto).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/{colors|designs|batch-folders}/:id
pub async fn rename(
    State(kind): State<ReferenceKind>,
    Path(id): Path<i64>,
    Json(dto): Json<ReferenceItemDto>,
) -> ApiResult<Json<ReferenceItem>> {
    Ok(Json(service::rename(kind, id, dto).await?))
}

/// DELETE /api/{colors|designs|batch-folders}/:id
pub async fn delete(State(kind): State<ReferenceKind>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    service::delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
