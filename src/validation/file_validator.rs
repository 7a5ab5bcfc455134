//! Individual upload checks and the aggregate validator
//!
//! The `is_*` / `detect_*` functions are the building blocks: each answers
//! one question about an upload and nothing else. [`validate_file`] composes
//! them into the full pre-ingestion report, and the `require_*` helpers wrap
//! the same checks as fail-fast results for handlers that want to bail on the
//! first problem.

use std::ffi::OsStr;
use std::path::Path;

use super::error::FileValidationError;
use super::{FileValidationConfig, ValidationDetails, ValidationResult, BYTES_PER_MB};

/// Substrings that never belong in an uploaded filename. Checked against the
/// lowercased name, so matching is case-insensitive.
const DANGEROUS_PATTERNS: &[&str] = &[
    "..", "../", "..\\", "\0", "<", ">", ":", "\"", "|", "?", "*",
];

/// Windows device names that are unusable as file stems regardless of
/// extension.
const RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Checks whether the filename's extension is in the allowed set.
///
/// Comparison is case-insensitive and tolerates allowed entries written with
/// or without a leading dot (`"pdf"` and `".pdf"` both match `report.PDF`).
/// Filenames with no extension at all are rejected.
pub fn is_allowed_extension(filename: &str, allowed_extensions: &[String]) -> bool {
    if filename.is_empty() {
        return false;
    }

    let extension = match Path::new(filename).extension().and_then(OsStr::to_str) {
        Some(ext) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => return false,
    };

    allowed_extensions.iter().any(|allowed| {
        let normalized = allowed.strip_prefix('.').unwrap_or(allowed);
        normalized.eq_ignore_ascii_case(&extension)
    })
}

/// Checks whether `file_size` fits within `max_size`.
///
/// The boundary is inclusive: a file exactly at the limit passes. Negative
/// sizes are a caller bug (they can only come from untrusted or corrupted
/// input) and are reported as an error rather than a failed check.
pub fn is_within_size_limit(file_size: i64, max_size: i64) -> Result<bool, FileValidationError> {
    if file_size < 0 || max_size < 0 {
        return Err(FileValidationError::invalid_argument(
            "File sizes cannot be negative",
        ));
    }
    Ok(file_size <= max_size)
}

/// Converts a byte count to fractional megabytes. The value is not rounded,
/// display strings apply their own `{:.2}` formatting.
pub fn file_size_mb(file_size: i64) -> Result<f64, FileValidationError> {
    if file_size < 0 {
        return Err(FileValidationError::invalid_argument(
            "File size cannot be negative",
        ));
    }
    Ok(file_size as f64 / BYTES_PER_MB)
}

/// Detects the MIME type of an upload.
///
/// The filename is consulted first via the shared extension table; when the
/// name gives no answer the content's magic bytes are sniffed. Detection
/// never fails on unknown input, it falls back to `application/octet-stream`.
/// Empty content is an error because there is nothing to sniff.
///
/// # Arguments
/// * `content` - Raw file bytes, at least the first few bytes of the upload
/// * `filename` - Original filename as supplied by the client
pub fn detect_content_type(
    content: &[u8],
    filename: &str,
) -> Result<String, FileValidationError> {
    if content.is_empty() {
        return Err(FileValidationError::invalid_argument(
            "File content cannot be empty",
        ));
    }

    if let Some(mime) = mime_guess::from_path(filename).first() {
        return Ok(mime.essence_str().to_string());
    }

    if content.starts_with(b"%PDF") {
        return Ok(mime::APPLICATION_PDF.to_string());
    }
    // DOCX and other OOXML documents are zip containers
    if content.starts_with(b"PK\x03\x04") {
        return Ok("application/zip".to_string());
    }

    Ok(mime::APPLICATION_OCTET_STREAM.to_string())
}

/// Checks whether a filename is safe to store and echo back.
///
/// Rejects names that carry path components, contain traversal sequences or
/// characters that are dangerous on common filesystems, or collide with
/// Windows reserved device names.
pub fn is_safe_filename(filename: &str) -> bool {
    if filename.is_empty() {
        return false;
    }

    // Anything with a path component is not a bare filename
    if Path::new(filename).file_name() != Some(OsStr::new(filename)) {
        return false;
    }

    let lowered = filename.to_lowercase();
    if DANGEROUS_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
    {
        return false;
    }

    let stem = Path::new(filename)
        .file_stem()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    !RESERVED_NAMES.contains(&stem.as_str())
}

/// Runs every upload check and aggregates the outcome.
///
/// Unlike the `require_*` helpers this never short-circuits: all checks run
/// and every failure lands in `errors`, so a client uploading an oversized
/// file with a bad extension learns about both problems at once. `valid` is
/// true exactly when `errors` is empty.
///
/// # Arguments
/// * `content` - Raw file bytes
/// * `filename` - Original filename as supplied by the client
/// * `file_size` - Size in bytes as reported by the transport
/// * `config` - Limits and allowed extensions, usually from the settings
pub fn validate_file(
    content: &[u8],
    filename: &str,
    file_size: i64,
    config: &FileValidationConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let filename_safe = is_safe_filename(filename);
    if !filename_safe {
        errors.push("Filename contains unsafe characters or path traversal".to_string());
    }

    let extension_valid = is_allowed_extension(filename, &config.allowed_extensions);
    if !extension_valid {
        errors.push(format!(
            "File extension not allowed. Allowed: {}",
            config.allowed_extensions.join(", ")
        ));
    }

    let mut size_valid = false;
    let mut size_mb = None;
    let mut max_size_mb = None;
    match is_within_size_limit(file_size, config.max_upload_size) {
        Ok(within_limit) => {
            size_valid = within_limit;
            size_mb = file_size_mb(file_size).ok();
            max_size_mb = Some(config.max_upload_size_mb);
            if !within_limit {
                errors.push(format!(
                    "File size {:.2}MB exceeds maximum {:.2}MB",
                    file_size as f64 / BYTES_PER_MB,
                    config.max_upload_size_mb
                ));
            }
        }
        Err(err) => {
            errors.push(format!("Size validation failed: {err}"));
        }
    }

    let mut detected_type = None;
    let mut type_valid = false;
    match detect_content_type(content, filename) {
        Ok(detected) => {
            detected_type = Some(detected);
            type_valid = true;
        }
        Err(err) => {
            errors.push(format!("File type detection failed: {err}"));
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        details: ValidationDetails {
            filename_safe,
            extension_valid,
            size_valid,
            file_size_mb: size_mb,
            max_size_mb,
            detected_type,
            type_valid,
        },
    }
}

/// Fail-fast extension check, for handlers that reject on the first problem.
pub fn require_allowed_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<(), FileValidationError> {
    if is_allowed_extension(filename, allowed_extensions) {
        return Ok(());
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or_default()
        .to_ascii_lowercase();
    Err(FileValidationError::invalid_extension(
        filename,
        extension,
        allowed_extensions.to_vec(),
    ))
}

/// Fail-fast size check.
pub fn require_size_within_limit(
    filename: &str,
    file_size: i64,
    max_size: i64,
) -> Result<(), FileValidationError> {
    if is_within_size_limit(file_size, max_size)? {
        Ok(())
    } else {
        Err(FileValidationError::too_large(filename, file_size, max_size))
    }
}

/// Fail-fast content-type check. Returns the detected type on success.
///
/// An empty `supported_types` list accepts every detected type, which keeps
/// detection useful for callers that only want the MIME string.
pub fn require_supported_type(
    content: &[u8],
    filename: &str,
    supported_types: &[String],
) -> Result<String, FileValidationError> {
    let detected = detect_content_type(content, filename)?;
    if supported_types.is_empty() || supported_types.iter().any(|ty| ty == &detected) {
        Ok(detected)
    } else {
        Err(FileValidationError::unsupported_type(
            filename,
            detected,
            supported_types.to_vec(),
        ))
    }
}
