// Docket Intake - Upload validation and intake service for court documents

pub mod config;
pub mod models;
pub mod validation;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Settings;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
