//! Domain Layer
//!
//! Pure domain logic without infrastructure dependencies.
//! Contains entities, value objects, the load-time migration, and errors.

pub mod entities;
pub mod errors;
pub mod migration;
pub mod value_objects;

// Re-exports for convenience
pub use entities::*;
pub use errors::*;
pub use migration::*;
pub use value_objects::*;
