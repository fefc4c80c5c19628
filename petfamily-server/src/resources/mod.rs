//! Resource declarations
//!
//! One static [`ResourceSpec`] per table. The generic repository and
//! router serve every entry of [`CRUD`]; status and services get extra
//! routes of their own.

pub mod address;
pub mod contract;
pub mod lodging;
pub mod pet;
pub mod user;

use crate::models::ResourceSpec;

/// Resources served with the full generic CRUD surface
pub static CRUD: [&ResourceSpec; 14] = [
    &user::USER,
    &contract::CONTRACT,
    &contract::CONTRACT_SERVICE,
    &lodging::LODGING,
    &address::STATE,
    &address::CITY,
    &address::NEIGHBOURHOOD,
    &address::STREET,
    &address::CEP,
    &address::ADDRESS,
    &pet::PET,
    &pet::SIZE,
    &pet::SPECIES,
    &pet::BREED,
];
