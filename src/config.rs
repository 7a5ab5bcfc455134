use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Application settings loaded once at startup from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_env: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub max_upload_size: i64,
    pub upload_dir: PathBuf,
    pub allowed_extensions: String,
    pub encryption_key: String,
    pub data_retention_hours: u32,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "Docket Intake".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            debug: env::var("DEBUG")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("DEBUG must be true or false")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .unwrap_or_else(|_| "104857600".to_string()) // 100MB
                .parse()?,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| "pdf,docx,doc,txt".to_string()),
            encryption_key: env::var("ENCRYPTION_KEY").unwrap_or_default(),
            data_retention_hours: env::var("DATA_RETENTION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_file: match env::var("LOG_FILE") {
                Ok(value) if value.is_empty() => None,
                Ok(value) => Some(PathBuf::from(value)),
                Err(_) => Some(PathBuf::from("logs/app.log")),
            },
        })
    }

    /// Allowed upload extensions as a normalized list.
    pub fn allowed_extensions_list(&self) -> Vec<String> {
        self.allowed_extensions
            .split(',')
            .map(|ext| ext.trim().to_lowercase())
            .collect()
    }

    /// Create the upload directory if it does not exist yet.
    pub fn ensure_upload_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.upload_dir).with_context(|| {
            format!(
                "failed to create upload directory {}",
                self.upload_dir.display()
            )
        })?;
        Ok(())
    }
}
