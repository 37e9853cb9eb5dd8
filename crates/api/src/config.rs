use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;
use crate::auth::passwords::AdminPasswords;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// Where uploaded media is written and served from.
    pub upload: UploadConfig,
    /// Shared admin passwords.
    pub passwords: AdminPasswords,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Upload root settings.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to.
    pub dir: PathBuf,
    /// URL prefix the directory is served under; media paths start with it.
    pub public_prefix: String,
    /// Maximum accepted request body size in bytes.
    pub max_bytes: usize,
}

/// Default upload limit (100 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `UPLOAD_PUBLIC_PREFIX` | `/uploads`                 |
    /// | `MAX_UPLOAD_BYTES`     | `104857600`                |
    ///
    /// See [`AdminPasswords::from_env`] and [`JwtConfig::from_env`] for the
    /// required secrets.
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

        let upload = UploadConfig::from_env();
        let passwords = AdminPasswords::from_env();
        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload,
            passwords,
            jwt,
        }
    }
}

impl UploadConfig {
    pub fn from_env() -> Self {
        let dir = PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let public_prefix = std::env::var("UPLOAD_PUBLIC_PREFIX")
            .unwrap_or_else(|_| "/uploads".into())
            .trim_end_matches('/')
            .to_string();
        assert!(
            public_prefix.starts_with('/') && public_prefix.len() > 1,
            "UPLOAD_PUBLIC_PREFIX must be an absolute URL path such as /uploads"
        );

        let max_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            dir,
            public_prefix,
            max_bytes,
        }
    }
}
