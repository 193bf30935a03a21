//! Core domain logic for carta, an in-memory restaurant catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{Coordinate, Entity, EntityKind, EntityValidationError};
pub use repo::registry::{EntityRegistry, RegistryError, RegistryResult};
pub use repo::relation::{OrderedRelation, RelationError, RelationIndex};
pub use service::manager::{ManagerError, ManagerResult, RestaurantManager};
pub use service::query::{Comparator, DishFacts};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
