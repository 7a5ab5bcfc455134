//! Typed file-validation errors
//!
//! Each error kind carries the context a client needs to act on the failure
//! (offending filename, the limit that was exceeded, the allowed set) plus a
//! machine-readable error code and the HTTP status the API should answer
//! with. `to_json` produces the API error body, and the `IntoResponse` impl
//! lets upload handlers return these errors directly with `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use super::BYTES_PER_MB;

/// File validation failures surfaced to API clients.
#[derive(Debug, Clone, Error)]
pub enum FileValidationError {
    /// Generic validation failure.
    #[error("{message}")]
    Invalid {
        message: String,
        filename: Option<String>,
    },

    /// The filename's extension is not in the allowed set.
    #[error(
        "File extension '.{extension}' is not allowed. Allowed extensions: {}",
        dotted_extensions(.allowed_extensions)
    )]
    InvalidExtension {
        filename: String,
        extension: String,
        allowed_extensions: Vec<String>,
    },

    /// The file exceeds the configured upload size limit.
    #[error(
        "File size {:.2}MB exceeds maximum allowed size {:.2}MB",
        bytes_to_mb(.file_size),
        bytes_to_mb(.max_size)
    )]
    TooLarge {
        filename: String,
        file_size: i64,
        max_size: i64,
    },

    /// The detected content type is not supported for processing.
    #[error(
        "Unsupported file type: {detected_type}{}",
        supported_types_suffix(.supported_types)
    )]
    UnsupportedType {
        filename: String,
        detected_type: String,
        supported_types: Vec<String>,
    },

    /// A check was called with arguments that make no sense, such as a
    /// negative size or empty content.
    #[error("{0}")]
    InvalidArgument(String),
}

impl FileValidationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            filename: None,
        }
    }

    pub fn invalid_extension(
        filename: impl Into<String>,
        extension: impl Into<String>,
        allowed_extensions: Vec<String>,
    ) -> Self {
        Self::InvalidExtension {
            filename: filename.into(),
            extension: extension.into(),
            allowed_extensions,
        }
    }

    pub fn too_large(filename: impl Into<String>, file_size: i64, max_size: i64) -> Self {
        Self::TooLarge {
            filename: filename.into(),
            file_size,
            max_size,
        }
    }

    pub fn unsupported_type(
        filename: impl Into<String>,
        detected_type: impl Into<String>,
        supported_types: Vec<String>,
    ) -> Self {
        Self::UnsupportedType {
            filename: filename.into(),
            detected_type: detected_type.into(),
            supported_types,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Machine-readable error code for API clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "FILE_VALIDATION_ERROR",
            Self::InvalidExtension { .. } => "INVALID_FILE_EXTENSION",
            Self::TooLarge { .. } => "FILE_TOO_LARGE",
            Self::UnsupportedType { .. } => "UNSUPPORTED_FILE_TYPE",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    /// HTTP status the API should answer with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Invalid { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidExtension { .. } => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The filename the failure refers to, when one is known.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Invalid { filename, .. } => filename.as_deref(),
            Self::InvalidExtension { filename, .. }
            | Self::TooLarge { filename, .. }
            | Self::UnsupportedType { filename, .. } => Some(filename.as_str()),
            Self::InvalidArgument(_) => None,
        }
    }

    /// API error body: common fields plus the variant-specific payload.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "filename": self.filename(),
            "status_code": self.status_code().as_u16(),
        });

        if let Some(Value::Object(extra)) = self.extra_fields() {
            if let Some(object) = body.as_object_mut() {
                object.extend(extra);
            }
        }

        body
    }

    fn extra_fields(&self) -> Option<Value> {
        match self {
            Self::InvalidExtension {
                extension,
                allowed_extensions,
                ..
            } => Some(json!({
                "actual_extension": extension,
                "allowed_extensions": allowed_extensions,
            })),
            Self::TooLarge {
                file_size,
                max_size,
                ..
            } => Some(json!({
                "file_size_bytes": file_size,
                "max_size_bytes": max_size,
                "file_size_mb": bytes_to_mb(file_size),
                "max_size_mb": bytes_to_mb(max_size),
            })),
            Self::UnsupportedType {
                detected_type,
                supported_types,
                ..
            } => Some(json!({
                "detected_type": detected_type,
                "supported_types": supported_types,
            })),
            Self::Invalid { .. } | Self::InvalidArgument(_) => None,
        }
    }
}

impl IntoResponse for FileValidationError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

fn bytes_to_mb(bytes: &i64) -> f64 {
    *bytes as f64 / BYTES_PER_MB
}

fn dotted_extensions(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|ext| format!(".{}", ext.strip_prefix('.').unwrap_or(ext)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn supported_types_suffix(types: &[String]) -> String {
    if types.is_empty() {
        String::new()
    } else {
        format!(". Supported types: {}", types.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: i64 = 1024 * 1024;

    #[test]
    fn test_invalid_extension_message() {
        let err = FileValidationError::invalid_extension(
            "report.exe",
            "exe",
            vec!["pdf".to_string(), "docx".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "File extension '.exe' is not allowed. Allowed extensions: .pdf, .docx"
        );
        assert_eq!(err.error_code(), "INVALID_FILE_EXTENSION");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.filename(), Some("report.exe"));
    }

    #[test]
    fn test_too_large_message() {
        let err = FileValidationError::too_large("big.pdf", 5 * MB, 2 * MB);
        assert_eq!(
            err.to_string(),
            "File size 5.00MB exceeds maximum allowed size 2.00MB"
        );
        assert_eq!(err.error_code(), "FILE_TOO_LARGE");
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = FileValidationError::unsupported_type(
            "archive.bin",
            "application/zip",
            vec!["application/pdf".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Unsupported file type: application/zip. Supported types: application/pdf"
        );
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let bare =
            FileValidationError::unsupported_type("archive.bin", "application/zip", Vec::new());
        assert_eq!(bare.to_string(), "Unsupported file type: application/zip");
    }

    #[test]
    fn test_generic_and_argument_errors() {
        let err = FileValidationError::invalid("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
        assert_eq!(err.error_code(), "FILE_VALIDATION_ERROR");
        assert_eq!(err.filename(), None);

        let with_name = FileValidationError::Invalid {
            message: "bad upload".to_string(),
            filename: Some("draft.doc".to_string()),
        };
        assert_eq!(with_name.filename(), Some("draft.doc"));

        let arg = FileValidationError::invalid_argument("File sizes cannot be negative");
        assert_eq!(arg.error_code(), "INVALID_ARGUMENT");
        assert_eq!(arg.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(arg.filename(), None);
    }

    #[test]
    fn test_to_json_fields() {
        let err = FileValidationError::too_large("big.pdf", 5 * MB, 2 * MB);
        let body = err.to_json();

        assert_eq!(body["error"], "FILE_TOO_LARGE");
        assert_eq!(body["filename"], "big.pdf");
        assert_eq!(body["status_code"], 413);
        assert_eq!(body["file_size_bytes"], 5 * MB);
        assert_eq!(body["max_size_bytes"], 2 * MB);
        assert_eq!(body["file_size_mb"], 5.0);
        assert_eq!(body["max_size_mb"], 2.0);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("exceeds maximum allowed size"));

        let ext = FileValidationError::invalid_extension(
            "report.exe",
            "exe",
            vec!["pdf".to_string()],
        );
        let body = ext.to_json();
        assert_eq!(body["actual_extension"], "exe");
        assert_eq!(body["allowed_extensions"], json!(["pdf"]));

        let generic = FileValidationError::invalid("nope");
        let body = generic.to_json();
        assert!(body["filename"].is_null());
        assert!(body.get("actual_extension").is_none());
    }

    #[tokio::test]
    async fn test_into_response() {
        let err = FileValidationError::too_large("big.pdf", 5 * MB, 2 * MB);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "FILE_TOO_LARGE");
        assert_eq!(body["status_code"], 413);
    }
}
