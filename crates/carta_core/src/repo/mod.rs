//! In-memory registry and relationship structures.
//!
//! # Responsibility
//! - Provide name-keyed, insertion-ordered storage per entity kind.
//! - Provide many-to-many relationship indexes, plain and position-ordered.
//!
//! # Invariants
//! - Registry writes enforce `Entity::validate()` before storing.
//! - Registries return semantic errors (`Duplicate`, `NotFound`,
//!   `TypeMismatch`) instead of panicking.
//! - Relationship structures hold names only; registry membership is
//!   validated by the manager before mutation.

pub mod registry;
pub mod relation;
