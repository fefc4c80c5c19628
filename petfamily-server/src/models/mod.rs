//! Domain models with validation at construction
//!
//! All user input is validated before it reaches the database.
//! Invalid input returns ValidationError, not panic.

pub mod contract_state;
pub mod field;
pub mod record;
pub mod resource;
pub mod validation;

pub use contract_state::ContractState;
pub use field::{FieldKind, SqlValue};
pub use record::{validate_create, validate_update, Record};
pub use resource::{Consistency, Dependent, Field, Filter, FilterOp, Filters, Noun, ResourceSpec};
pub use validation::ValidationError;
