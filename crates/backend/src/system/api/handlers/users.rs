use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, User};

use crate::shared::error::{ApiError, ApiResult};
use crate::shared::logger;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// List all users (admin only)
pub async fn list(CurrentUser(_claims): CurrentUser) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service::list_all().await?))
}

/// Get user by ID (admin only)
pub async fn get_by_id(
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = service::get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user))
}

/// Create user (admin only)
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let username = dto.username.trim().to_string();
    let user_id = service::create(dto).await?;

    logger::log(
        logger::CATEGORY_AUTH,
        &format!("{} created user {}", claims.username, username),
    );

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": user_id }))))
}

/// Delete user (admin only)
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !service::delete(&id, &claims.sub).await? {
        return Err(ApiError::NotFound(format!("User {} not found", id)));
    }

    logger::log(
        logger::CATEGORY_AUTH,
        &format!("{} deleted user {}", claims.username, id),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Change password
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> ApiResult<StatusCode> {
    dto.user_id = id;
    service::change_password(dto, &claims.sub).await?;
    Ok(StatusCode::OK)
}
