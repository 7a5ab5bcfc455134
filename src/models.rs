use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
}

// API response types

/// Banner returned by the root endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
}
