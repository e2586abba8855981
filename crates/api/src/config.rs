use std::path::PathBuf;

use rubric_core::uploads::parse_allow_list;

use crate::auth::session::SessionConfig;

/// Default audio extensions accepted by admin ingestion.
const DEFAULT_ALLOWED_EXTENSIONS: &str = "mp3,wav,ogg,m4a,aac";

/// Default image extensions accepted for profile pictures.
const DEFAULT_ALLOWED_IMAGE_EXTENSIONS: &str = "jpg,jpeg,png,gif";

/// Default multipart body limit (100 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token and cookie settings.
    pub session: SessionConfig,
    /// Upload storage settings.
    pub uploads: UploadConfig,
}

/// Where uploads are stored and which files are accepted.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory holding audio files and profile images.
    pub upload_dir: PathBuf,
    /// Lowercase audio extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
    /// Lowercase image extensions without the leading dot.
    pub allowed_image_extensions: Vec<String>,
    /// Request body limit applied to multipart routes.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    ///
    /// Session and upload variables are documented on
    /// [`SessionConfig::from_env`] and [`UploadConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session: SessionConfig::from_env(),
            uploads: UploadConfig::from_env(),
        }
    }
}

impl UploadConfig {
    /// Load upload settings from environment variables.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `UPLOAD_FOLDER`            | `uploads`                  |
    /// | `ALLOWED_EXTENSIONS`       | `mp3,wav,ogg,m4a,aac`      |
    /// | `ALLOWED_IMAGE_EXTENSIONS` | `jpg,jpeg,png,gif`         |
    /// | `MAX_UPLOAD_BYTES`         | `104857600`                |
    ///
    /// # Panics
    ///
    /// Panics if an allow-list is configured but empty.
    pub fn from_env() -> Self {
        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".into()),
        );

        let allowed_extensions = parse_allow_list(
            &std::env::var("ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.into()),
        );
        assert!(
            !allowed_extensions.is_empty(),
            "ALLOWED_EXTENSIONS must list at least one extension"
        );

        let allowed_image_extensions = parse_allow_list(
            &std::env::var("ALLOWED_IMAGE_EXTENSIONS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_IMAGE_EXTENSIONS.into()),
        );
        assert!(
            !allowed_image_extensions.is_empty(),
            "ALLOWED_IMAGE_EXTENSIONS must list at least one extension"
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            upload_dir,
            allowed_extensions,
            allowed_image_extensions,
            max_upload_bytes,
        }
    }
}
