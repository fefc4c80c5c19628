//! Route handlers organized by resource

pub mod health;
pub mod lookups;
pub mod resource;
pub mod services;
pub mod status;
