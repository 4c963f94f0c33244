// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod date_only;
pub mod expense;
pub mod place;
pub mod travel;

pub use expense::*;
pub use place::*;
pub use travel::*;
