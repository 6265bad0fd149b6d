use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a001_order::LifecycleError;
use contracts::domain::common::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Error returned by HTTP handlers, rendered as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(ValidationError::Duplicate { .. }) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Lifecycle(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Services return `anyhow`; typed causes keep their status code
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ApiError>() {
            Ok(api) => return api,
            Err(err) => err,
        };
        let err = match err.downcast::<ValidationError>() {
            Ok(validation) => return ApiError::Validation(validation),
            Err(err) => err,
        };
        match err.downcast::<LifecycleError>() {
            Ok(lifecycle) => ApiError::Lifecycle(lifecycle),
            Err(err) => ApiError::Internal(format!("{:#}", err)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(details) => {
                tracing::error!("Internal error: {}", details);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_order::{LifecycleAction, OrderLifecycle};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(ValidationError::Required("Name".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::Duplicate {
                kind: "Color".into(),
                name: "Black".into()
            })
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_anyhow_downcasts_typed_causes() {
        let lifecycle = OrderLifecycle::Trashed
            .apply(&LifecycleAction::MoveToTrash)
            .unwrap_err();
        let err: ApiError = anyhow::Error::from(lifecycle).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = anyhow::Error::from(ValidationError::Invalid("bad".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = anyhow::Error::from(ApiError::NotFound("Order 7".into())).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Order 7");
    }

    #[test]
    fn test_untyped_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
