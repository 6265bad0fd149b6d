use axum::extract::{Path, Query};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::dashboards::d401_reports::ReportKind;
use contracts::domain::common::ValidationError;
use serde::Deserialize;

use crate::dashboards::d401_reports::{csv_export, service};
use crate::shared::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ReportQuery {
    /// `json` (default) or `csv`
    pub format: Option<String>,
}

/// GET /api/reports/:kind?format=json|csv
pub async fn get_report(
    Path(code): Path<String>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    let kind = ReportKind::from_code(&code)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown report '{}'", code)))?;
    let report = service::get_report(kind).await?;

    match query.format.as_deref().unwrap_or("json") {
        "json" => Ok(Json(report).into_response()),
        "csv" => {
            let body = csv_export::render_csv(&report)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        csv_export::attachment_header(kind.file_stem()),
                    ),
                ],
                body,
            )
                .into_response())
        }
        other => Err(ValidationError::Invalid(format!("Unsupported report format '{}'", other)).into()),
    }
}
