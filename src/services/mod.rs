// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod expense_service;
pub mod image_store;
pub mod place_service;
pub mod travel_service;

pub use expense_service::*;
pub use image_store::*;
pub use place_service::*;
pub use travel_service::*;
