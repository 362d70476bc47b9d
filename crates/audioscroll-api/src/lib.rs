pub mod banners;
pub mod config;
pub mod error;
pub mod health;
pub mod spotlight;
pub mod state;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// All routes, ready for the server binary to wrap in its middleware
/// layers. Built here rather than in main so integration tests can drive
/// the app in-process against an in-memory store.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/config",
            get(config::get_config).put(config::update_config),
        )
        .route(
            "/api/banners",
            get(banners::list_banners).post(banners::create_banner),
        )
        .route(
            "/api/banners/{id}",
            get(banners::get_banner)
                .put(banners::update_banner)
                .delete(banners::delete_banner),
        )
        .route(
            "/api/spotlight",
            get(spotlight::list_spotlights).post(spotlight::create_spotlight),
        )
        .route(
            "/api/spotlight/{id}",
            get(spotlight::get_spotlight)
                .put(spotlight::update_spotlight)
                .delete(spotlight::delete_spotlight),
        )
        .with_state(state)
}
