use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use wsp_resolver::SiteResolver;

use crate::handler;

/// Path of the configuration introspection endpoint.
pub const CONFIG_PATH: &str = "/__config";

/// Build the preview router: `/__config` plus a catch-all resolving site paths.
pub fn build_router(resolver: Arc<SiteResolver>) -> Router {
    Router::new()
        .route(CONFIG_PATH, get(handler::config_handler))
        .fallback(handler::resource_handler)
        .with_state(resolver)
        .layer(TraceLayer::new_for_http())
}
