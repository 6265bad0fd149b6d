use axum::extract::Query;
use axum::Json;
use contracts::dashboards::d400_customers::{CustomerFilter, CustomerPage, FilterOptions};

use crate::dashboards::d400_customers::service;
use crate::shared::error::ApiResult;

/// GET /api/dashboard/customers?name=&color=&size=&design=&batch_folder=&page=
pub async fn get_customers(Query(filter): Query<CustomerFilter>) -> ApiResult<Json<CustomerPage>> {
    Ok(Json(service::get_customer_page(filter).await?))
}

/// GET /api/dashboard/filters
pub async fn get_filter_options() -> ApiResult<Json<FilterOptions>> {
    Ok(Json(service::get_filter_options().await?))
}
