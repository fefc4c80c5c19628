//! petfamily-server: pet-boarding REST backend
//!
//! Users, lodgings and their services, contracts with a status lifecycle,
//! the Brazilian address hierarchy, and pets with their size, species and
//! breed lookups. Every resource is served from a declarative
//! [`models::ResourceSpec`] by one generic repository and router.

pub mod db;
pub mod http;
pub mod models;
pub mod resources;
