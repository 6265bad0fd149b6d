use axum::{extract::Json, http::StatusCode};
use chrono::Utc;
use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::logger;
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login for {}", request.username.trim());
            ApiError::Unauthorized
        })?;

    let (access_token, expires_at) =
        jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;

    let refresh_token = jwt::generate_refresh_token();
    store_refresh_token(&user.id, &refresh_token).await?;

    logger::log(
        logger::CATEGORY_AUTH,
        &format!("{} signed in", user.username),
    );

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        expires_at,
        user: user.into(),
    }))
}

/// Refresh token handler
pub async fn refresh(Json(request): Json<RefreshRequest>) -> ApiResult<Json<RefreshResponse>> {
    let user_id = validate_refresh_token(&request.refresh_token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let user = user_service::get_by_id(&user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(ApiError::Unauthorized)?;

    let (access_token, expires_at) =
        jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;

    Ok(Json(RefreshResponse {
        access_token,
        expires_at,
    }))
}

/// Logout handler
pub async fn logout(Json(request): Json<RefreshRequest>) -> ApiResult<StatusCode> {
    revoke_refresh_token(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> ApiResult<Json<UserInfo>> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", claims.sub)))?;

    Ok(Json(user.into()))
}

// Helper functions for refresh tokens

async fn store_refresh_token(user_id: &str, token: &str) -> anyhow::Result<()> {
    let token_id = uuid::Uuid::new_v4().to_string();
    let expires_at = jwt::calculate_refresh_token_expiration();
    let created_at = Utc::now().to_rfc3339();

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                token_id.into(),
                user_id.to_string().into(),
                hash_token(token).into(),
                expires_at.into(),
                created_at.into(),
            ],
        ))
        .await?;

    Ok(())
}

/// Owner of a live (unexpired, unrevoked) refresh token
async fn validate_refresh_token(token: &str) -> anyhow::Result<Option<String>> {
    let now = Utc::now().to_rfc3339();

    let result = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [hash_token(token).into(), now.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row.try_get("", "user_id")?)),
        None => Ok(None),
    }
}

async fn revoke_refresh_token(token: &str) -> anyhow::Result<()> {
    let revoked_at = Utc::now().to_rfc3339();

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
            [revoked_at.into(), hash_token(token).into()],
        ))
        .await?;

    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = hash_token("refresh");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("refresh"));
        assert_ne!(hash, hash_token("other"));
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
