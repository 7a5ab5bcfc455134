//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/` - Service banner
//! - `/health` - Health check

pub mod health;
pub mod root;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
///
/// Endpoint routers are merged into one tree, request tracing is layered on,
/// and CORS is applied outermost so preflight requests are answered before
/// any route logic runs.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let router = Router::new()
        .merge(root::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http());

    apply_cors(router)
}
