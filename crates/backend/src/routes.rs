use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, system};

/// Route table for the whole application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Season configuration (write side checks the admin role itself)
        .route(
            "/api/system/settings/season",
            get(system::handlers::settings::get_season)
                .put(system::handlers::settings::update_season)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // CARTON ENTRY / REVIEW ROUTES
        // ========================================
        .route(
            "/api/cartons",
            get(handlers::a001_carton::list_all)
                .post(handlers::a001_carton::commit)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/cartons/summary",
            get(handlers::a001_carton::summary)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/cartons/:id",
            delete(handlers::a001_carton::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // Sheet registry
        .route(
            "/api/sheets",
            get(handlers::a002_sheet::list_all)
                .post(handlers::a002_sheet::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/sheets/active",
            get(handlers::a002_sheet::active)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Export workbook download
        .route(
            "/api/export",
            get(handlers::u901_export_workbook::download)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
}
