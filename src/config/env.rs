// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup, then share it as web::Data
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL host
    pub db_host: String,

    /// PostgreSQL port (default 5432)
    pub db_port: u16,

    /// PostgreSQL user
    pub db_user: String,

    /// PostgreSQL password
    pub db_password: String,

    /// PostgreSQL database name
    pub db_name: String,

    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8080)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Root of the image tree (`travel/{id}/...` lives below it)
    pub image_dir: PathBuf,

    /// Origin echoed in Access-Control-Allow-Origin
    pub cors_allowed_origin: String,

    /// Upper bound for buffered request bodies (multipart image uploads)
    pub max_upload_bytes: usize,

    /// Maximum connections in database pool
    pub db_max_connections: u32,

    /// Connection timeout in seconds
    pub db_connection_timeout: u64,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            db_host: var_or("DB_HOST", "localhost"),
            db_port: parsed_or("DB_PORT", 5432),
            db_user: var_or("DB_USER", "postgres"),
            db_password: var_or("DB_PASSWORD", ""),
            db_name: var_or("DB_NAME", "travel"),

            server_address: var_or("SERVER_ADDRESS", "127.0.0.1"),
            server_port: parsed_or("SERVER_PORT", 8080),

            environment: var_or("ENVIRONMENT", "development"),
            log_level: var_or("LOG_LEVEL", "info"),

            image_dir: PathBuf::from(var_or("IMAGE_DIR", "./images")),
            cors_allowed_origin: var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            max_upload_bytes: parsed_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),

            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", 10),
            db_connection_timeout: parsed_or("DB_CONNECTION_TIMEOUT", 30),
            run_migrations: parsed_or("RUN_MIGRATIONS", true),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.db_host.is_empty() {
            return Err("DB_HOST is required".to_string());
        }

        if self.db_user.is_empty() {
            return Err("DB_USER is required".to_string());
        }

        if self.db_name.is_empty() {
            return Err("DB_NAME is required".to_string());
        }

        if self.image_dir.as_os_str().is_empty() {
            return Err("IMAGE_DIR is required".to_string());
        }

        if self.db_password.is_empty() {
            log::warn!("DB_PASSWORD not configured - connecting without a password");
        }

        Ok(())
    }

    /// Connection options for the PostgreSQL pool
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);

        if self.db_password.is_empty() {
            options
        } else {
            options.password(&self.db_password)
        }
    }
}
