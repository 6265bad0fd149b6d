use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::system::auth;

/// System routes: health, sessions and user management
pub fn configure_system_routes() -> Router {
    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/system/auth/login", post(handlers::auth::login))
        .route("/api/system/auth/refresh", post(handlers::auth::refresh))
        .route("/api/system/auth/logout", post(handlers::auth::logout))
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(handlers::auth::current_user)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
        // ========================================
        // SYSTEM USERS MANAGEMENT (admin only)
        // ========================================
        .route(
            "/api/system/users",
            get(handlers::users::list)
                .post(handlers::users::create)
                .layer(middleware::from_fn(auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(handlers::users::get_by_id)
                .delete(handlers::users::delete)
                .layer(middleware::from_fn(auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(handlers::users::change_password)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
}
