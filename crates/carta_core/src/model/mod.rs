//! Unified domain model for catalog entities.
//!
//! # Responsibility
//! - Define the canonical entity record used by registries and the manager.
//! - Keep one entity shape for all five catalog projections.
//!
//! # Invariants
//! - Every entity is identified by a non-blank, case-sensitive name.
//! - Kind-specific fields stay `None` on foreign kinds.

pub mod entity;
