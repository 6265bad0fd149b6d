use axum::extract::Query;
use axum::Json;
use contracts::dashboards::d402_analytics::{DesignShare, TopCustomer};
use serde::Deserialize;

use crate::dashboards::d402_analytics::service::{self, DEFAULT_TOP_LIMIT};
use crate::shared::error::ApiResult;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TopCustomersQuery {
    pub limit: Option<usize>,
}

/// GET /api/analytics/designs
pub async fn get_design_distribution() -> ApiResult<Json<Vec<DesignShare>>> {
    Ok(Json(service::get_design_distribution().await?))
}

/// GET /api/analytics/top-customers?limit=
pub async fn get_top_customers(
    Query(query): Query<TopCustomersQuery>,
) -> ApiResult<Json<Vec<TopCustomer>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT).max(1);
    Ok(Json(service::get_top_customers(limit).await?))
}
