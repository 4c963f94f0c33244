// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, image store and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use actix_web::{
    middleware::{from_fn, Compress, Logger},
    web, App, HttpServer,
};
use config::Config;
use services::ImageStore;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load configuration (.env + process environment)
    let config = Config::from_env();

    // 2. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(2);
    }

    log::info!("Starting travel stories service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 3. Initialize database connection pool
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 4. Image tree
    let store = ImageStore::new(config.image_dir.clone());
    if let Err(e) = tokio::fs::create_dir_all(store.root()).await {
        log::error!("Failed to create image directory {:?}: {}", store.root(), e);
        std::process::exit(1);
    }
    log::info!("Serving images from {:?}", store.root());

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let max_upload_bytes = config.max_upload_bytes;
    let config = web::Data::new(config);
    let pool = web::Data::new(pool);
    let store = web::Data::new(store);

    HttpServer::new(move || {
        App::new()
            // Application state (database pool, image store and config)
            .app_data(pool.clone())
            .app_data(store.clone())
            .app_data(config.clone())
            // Extractor configuration
            .app_data(handlers::json_config())
            .app_data(handlers::path_config())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            // Middleware
            .wrap(from_fn(middleware::cors))
            .wrap(Compress::default())
            .wrap(Logger::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::api_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
