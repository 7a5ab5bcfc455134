use axum::extract::State;
use axum::{routing::get, Json, Router};

use crate::models::{AppState, ServiceInfo};

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(service_info)).with_state(state)
}

/// Service banner, mostly useful as a smoke test that the API is up.
async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: format!("Welcome to {}", state.settings.app_name),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
    })
}
