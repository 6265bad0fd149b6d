use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use contracts::domain::common::ReferenceKind;

use crate::handlers;
use crate::system::api::routes::configure_system_routes;
use crate::system::auth::middleware::require_auth;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .merge(configure_system_routes())
        .merge(public_routes())
        .merge(business_routes().route_layer(middleware::from_fn(require_auth)))
}

/// Customer order page; no authentication
fn public_routes() -> Router {
    Router::new()
        .route("/api/public/options", get(handlers::public::get_options))
        .route("/api/public/orders", post(handlers::public::submit_order))
}

fn business_routes() -> Router {
    Router::new()
        // ========================================
        // A001 ORDERS
        // ========================================
        .route(
            "/api/orders",
            get(handlers::a001_order::list_active).post(handlers::a001_order::create),
        )
        .route(
            "/api/orders/batch-folder",
            post(handlers::a001_order::assign_batch),
        )
        .route(
            "/api/orders/:id",
            get(handlers::a001_order::get_by_id)
                .put(handlers::a001_order::update)
                .delete(handlers::a001_order::delete),
        )
        .route(
            "/api/orders/:id/payment-status",
            post(handlers::a001_order::set_payment_status),
        )
        .route(
            "/api/orders/:id/trash",
            post(handlers::a001_order::move_to_trash),
        )
        .route(
            "/api/orders/:id/defective",
            post(handlers::a001_order::mark_defective),
        )
        .route("/api/customers", put(handlers::a001_order::update_customer))
        .route(
            "/api/customers/trash",
            post(handlers::a001_order::move_customer_to_trash),
        )
        .route("/api/defective", get(handlers::a001_order::list_defective))
        .route(
            "/api/defective/:id",
            axum::routing::delete(handlers::a001_order::delete_defective),
        )
        .route(
            "/api/defective/:id/note",
            put(handlers::a001_order::edit_defective_note),
        )
        .route(
            "/api/defective/:id/restore",
            post(handlers::a001_order::restore_defective),
        )
        // ========================================
        // A002 TRASH
        // ========================================
        .route(
            "/api/trash",
            get(handlers::a002_trash_order::list_all).delete(handlers::a002_trash_order::empty),
        )
        .route(
            "/api/trash/restore-all",
            post(handlers::a002_trash_order::restore_all),
        )
        .route(
            "/api/trash/:id",
            axum::routing::delete(handlers::a002_trash_order::delete),
        )
        .route(
            "/api/trash/:id/restore",
            post(handlers::a002_trash_order::restore),
        )
        // ========================================
        // A003 REFERENCE DATA
        // ========================================
        .nest("/api/colors", reference_routes(ReferenceKind::Color))
        .nest("/api/designs", reference_routes(ReferenceKind::Design))
        .nest(
            "/api/batch-folders",
            reference_routes(ReferenceKind::BatchFolder),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/dashboard/customers",
            get(handlers::d400_customers::get_customers),
        )
        .route(
            "/api/dashboard/filters",
            get(handlers::d400_customers::get_filter_options),
        )
        .route("/api/reports/:kind", get(handlers::d401_reports::get_report))
        .route(
            "/api/analytics/designs",
            get(handlers::d402_analytics::get_design_distribution),
        )
        .route(
            "/api/analytics/top-customers",
            get(handlers::d402_analytics::get_top_customers),
        )
        // ========================================
        // UTILITIES
        // ========================================
        .route("/api/changes", get(handlers::changes::stream))
        .route(
            "/api/logs",
            get(handlers::logs::list_all).delete(handlers::logs::clear_all),
        )
}

fn reference_routes(kind: ReferenceKind) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::a003_reference_data::list).post(handlers::a003_reference_data::create),
        )
        .route(
            "/:id",
            put(handlers::a003_reference_data::rename).delete(handlers::a003_reference_data::delete),
        )
        .with_state(kind)
}
