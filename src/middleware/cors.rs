// CORS configuration
// Applied to the assembled router in routes::create_router

use tower_http::cors::{CorsLayer, Any};
use axum::Router;

// TODO: Restrict allowed origins before production deployment
pub fn apply_cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
