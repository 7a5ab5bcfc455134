//! Upload Validation
//!
//! Pure validation helpers that guard document uploads before they reach the
//! ingestion pipeline:
//! - extension whitelist check
//! - size-limit check
//! - content-type detection (name lookup plus magic-byte sniffing)
//! - filename safety check (path traversal, dangerous characters, reserved
//!   device names)
//!
//! `validate_file` runs every check and aggregates all failures into a single
//! [`ValidationResult`] instead of stopping at the first one, so API clients
//! see the full list of problems in one round trip. The `require_*` variants
//! are the fail-fast counterparts and return typed [`FileValidationError`]
//! values that convert directly into HTTP responses.

pub mod error;
pub mod file_validator;

pub use error::*;
pub use file_validator::*;

use serde::Serialize;
use std::path::PathBuf;

use crate::config::Settings;

/// Bytes in a megabyte, used for human-readable size reporting.
pub(crate) const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Validation-relevant snapshot of the application settings.
#[derive(Debug, Clone)]
pub struct FileValidationConfig {
    pub max_upload_size: i64,
    pub max_upload_size_mb: f64,
    pub allowed_extensions: Vec<String>,
    pub upload_dir: PathBuf,
}

impl FileValidationConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_upload_size: settings.max_upload_size,
            max_upload_size_mb: settings.max_upload_size as f64 / BYTES_PER_MB,
            allowed_extensions: settings.allowed_extensions_list(),
            upload_dir: settings.upload_dir.clone(),
        }
    }
}

/// Aggregated outcome of all validation checks for one upload attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub details: ValidationDetails,
}

/// Per-check outcomes and derived values for the validation report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationDetails {
    pub filename_safe: bool,
    pub extension_valid: bool,
    pub size_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
    /// `None` (serialized as `null`) when detection failed.
    pub detected_type: Option<String>,
    pub type_valid: bool,
}
