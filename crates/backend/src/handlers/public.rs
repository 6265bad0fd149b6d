//! Endpoints of the customer-facing order page; no authentication.

use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_order::OrderCaptureDto;
use contracts::domain::common::{PublicOptions, ReferenceKind};
use contracts::enums::SIZE_ORDER;
use serde_json::json;

use crate::domain::a001_order::service;
use crate::domain::a003_reference_data::service as reference_service;
use crate::shared::error::ApiResult;

/// GET /api/public/options
pub async fn get_options() -> ApiResult<Json<PublicOptions>> {
    Ok(Json(PublicOptions {
        colors: reference_service::names(ReferenceKind::Color).await?,
        designs: reference_service::names(ReferenceKind::Design).await?,
        sizes: SIZE_ORDER.iter().map(|s| s.to_string()).collect(),
    }))
}

/// POST /api/public/orders
pub async fn submit_order(
    Json(dto): Json<OrderCaptureDto>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let ids = service::create_public(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "ids": ids }))))
}
