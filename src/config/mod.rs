// src/config/mod.rs
// DOCUMENTATION: Configuration module organization
// PURPOSE: Environment-driven settings and the PostgreSQL pool built from them

pub mod db;
pub mod env;

pub use db::{init_db_pool, MIGRATOR};
pub use env::Config;
