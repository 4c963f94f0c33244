// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and shared extractor configuration

pub mod expenses;
pub mod health;
pub mod multipart;
pub mod places;
pub mod travel;

pub use health::config as health_config;

use crate::errors::TravelError;
use actix_web::web;

/// All JSON endpoints, mounted under /api
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(travel::config)
            .configure(places::config)
            .configure(expenses::config),
    );
}

/// Malformed bodies become INVALID_INPUT (400) with the raw parser message
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| TravelError::InvalidInput(err.to_string()).into())
}

/// Malformed UUID path segments become INVALID_INPUT (400) instead of 404
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| TravelError::InvalidInput(err.to_string()).into())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::services::ImageStore;
    use sqlx::postgres::{PgPool, PgPoolOptions};
    use std::path::PathBuf;
    use uuid::Uuid;

    /// Pool that never connects unless a query runs; input-error paths stop before that
    pub(crate) fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://postgres@127.0.0.1:1/travel")
            .expect("lazy pool")
    }

    pub(crate) fn scratch_store() -> ImageStore {
        ImageStore::new(std::env::temp_dir().join(format!("travel-handlers-{}", Uuid::new_v4())))
    }

    pub(crate) fn test_config() -> Config {
        Config {
            db_host: "127.0.0.1".into(),
            db_port: 1,
            db_user: "postgres".into(),
            db_password: String::new(),
            db_name: "travel".into(),
            server_address: "127.0.0.1".into(),
            server_port: 0,
            environment: "test".into(),
            log_level: "debug".into(),
            image_dir: PathBuf::from("./images"),
            cors_allowed_origin: "http://localhost:3000".into(),
            max_upload_bytes: 1024 * 1024,
            db_max_connections: 1,
            db_connection_timeout: 1,
            run_migrations: false,
        }
    }

    /// Application wired like main.rs, minus Logger and Compress
    macro_rules! test_app {
        () => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data(actix_web::web::Data::new(
                        $crate::handlers::test_support::lazy_pool(),
                    ))
                    .app_data(actix_web::web::Data::new(
                        $crate::handlers::test_support::scratch_store(),
                    ))
                    .app_data(actix_web::web::Data::new(
                        $crate::handlers::test_support::test_config(),
                    ))
                    .app_data($crate::handlers::json_config())
                    .app_data($crate::handlers::path_config())
                    .wrap(actix_web::middleware::from_fn($crate::middleware::cors))
                    .configure($crate::handlers::health_config)
                    .configure($crate::handlers::api_config),
            )
        };
    }

    pub(crate) use test_app;
}
