use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::config::AuthConfig;
use crate::shared::data::db::get_connection;
use crate::shared::logger;

/// Tables of the authentication system
const AUTH_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS sys_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        last_login_at TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL,
        token_hash TEXT NOT NULL UNIQUE,
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        revoked_at TEXT,
        FOREIGN KEY (user_id) REFERENCES sys_users(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_refresh_tokens_user ON sys_refresh_tokens (user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
];

/// Apply authentication system migration
pub async fn apply_auth_migration() -> Result<()> {
    let conn = get_connection();

    for (idx, statement) in AUTH_SCHEMA.iter().enumerate() {
        let trimmed = statement.trim();
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            trimmed.to_string(),
        ))
        .await
        .with_context(|| {
            format!(
                "Failed to execute statement #{}: {}",
                idx,
                trimmed.lines().take(1).collect::<Vec<_>>().join(" ")
            )
        })?;
    }

    tracing::info!("Auth system schema ready");
    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists(auth: &AuthConfig) -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");

    let admin_id = service::create(CreateUserDto {
        username: auth.admin_username.clone(),
        password: auth.admin_password.clone(),
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    })
    .await?;

    tracing::warn!("Default admin user '{}' created (id {})", auth.admin_username, admin_id);
    tracing::warn!("Change the admin password after the first sign-in");
    logger::log(
        logger::CATEGORY_STARTUP,
        &format!("Created default admin user {}", auth.admin_username),
    );

    Ok(())
}
