pub mod repository;

use repository::log_event_internal;

/// Activity log categories
pub const CATEGORY_LIFECYCLE: &str = "lifecycle";
pub const CATEGORY_REFERENCE: &str = "reference";
pub const CATEGORY_ORDERS: &str = "orders";
pub const CATEGORY_AUTH: &str = "auth";
pub const CATEGORY_STARTUP: &str = "startup";

/// Record a server-side event in the activity log (fire and forget)
///
/// ```ignore
/// logger::log(logger::CATEGORY_STARTUP, "Server started");
/// ```
pub fn log(category: &str, message: &str) {
    tracing::debug!(target: "activity", "[{}] {}", category, message);
    log_event_internal("server", category, message);
}
