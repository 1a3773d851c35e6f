//! Start-up configuration read from the environment.
//!
//! Everything is validated once in [`AppConfig::from_env`]; a missing
//! required value stops the server before it binds.

use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;

/// Reads a required environment variable or fails with a readable message.
macro_rules! required_env {
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads and parses an optional environment variable, falling back to a default.
macro_rules! optional_env_parse {
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!("Unknown STORE_BACKEND '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub url: String,
    /// Database holding the `products` and `users` collections.
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Prefix of the `image_url` returned by `/upload`, without trailing slash.
    pub public_base_url: String,
    pub max_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub jwt_secret: String,
    /// `None` when running on the in-memory backend.
    pub database: Option<DatabaseConfig>,
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Loads and validates all configuration.
    ///
    /// # Errors
    /// Fails when `JWT_SECRET` is missing, when `STORE_BACKEND` is not
    /// recognised, or when the Mongo backend is selected without `DATABASE_URL`.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = required_env!("JWT_SECRET");
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let backend = match std::env::var("STORE_BACKEND") {
            Ok(value) => value.parse::<StoreBackend>()?,
            Err(_) => StoreBackend::Mongo,
        };
        let database = match backend {
            StoreBackend::Mongo => Some(DatabaseConfig {
                url: required_env!("DATABASE_URL"),
                name: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "essentia".to_string()),
            }),
            StoreBackend::Memory => None,
        };

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = optional_env_parse!("PORT", u16, 4000);

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();
        let upload = UploadConfig {
            dir: PathBuf::from(
                std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./upload/images".to_string()),
            ),
            public_base_url,
            max_bytes: optional_env_parse!("MAX_UPLOAD_BYTES", usize, 10 * 1024 * 1024),
        };

        Ok(Self {
            bind_addr,
            port,
            jwt_secret,
            database,
            upload,
        })
    }

    pub fn backend(&self) -> StoreBackend {
        if self.database.is_some() {
            StoreBackend::Mongo
        } else {
            StoreBackend::Memory
        }
    }
}
