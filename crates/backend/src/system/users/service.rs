use anyhow::Result;
use chrono::Utc;
use contracts::domain::common::ValidationError;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, User};

use super::repository;
use crate::shared::error::ApiError;
use crate::system::auth::password;

/// Create a new user
pub async fn create(dto: CreateUserDto) -> Result<String> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        return Err(ValidationError::Required("Username".into()).into());
    }

    if repository::get_by_username(&username).await?.is_some() {
        return Err(ValidationError::Duplicate {
            kind: "User".into(),
            name: username,
        }
        .into());
    }

    password::validate_password_strength(&dto.password)
        .map_err(|e| ValidationError::Invalid(e.to_string()))?;

    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username,
        full_name: dto.full_name,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;
    tracing::info!("Created user {}", user.username);

    Ok(user_id)
}

/// Delete user; the last active admin cannot be removed
pub async fn delete(id: &str, requester_id: &str) -> Result<bool> {
    if id == requester_id {
        return Err(ValidationError::Invalid("You cannot delete your own account".into()).into());
    }

    let Some(user) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    if user.is_admin && user.is_active && repository::count_admins().await? <= 1 {
        return Err(ValidationError::Invalid("Cannot delete the last administrator".into()).into());
    }

    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Change user password
pub async fn change_password(dto: ChangePasswordDto, requester_id: &str) -> Result<()> {
    repository::get_by_id(&dto.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", dto.user_id)))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if dto.user_id != requester_id {
        // Changing someone else's password - must be admin
        if !requester.is_admin {
            return Err(ApiError::Forbidden.into());
        }
    } else {
        let old_password = dto
            .old_password
            .as_deref()
            .ok_or_else(|| ValidationError::Required("Old password".into()))?;

        let current_hash = repository::get_password_hash(&dto.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

        if !password::verify_password(old_password, &current_hash)? {
            return Err(ValidationError::Invalid("Invalid old password".into()).into());
        }
    }

    password::validate_password_strength(&dto.new_password)
        .map_err(|e| ValidationError::Invalid(e.to_string()))?;

    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(&dto.user_id, &new_hash).await?;

    Ok(())
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username.trim()).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user {}", user.username);
        return Ok(None);
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.username, e);
    }

    Ok(Some(user))
}
