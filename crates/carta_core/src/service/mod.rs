//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate registries and relationship indexes behind one facade.
//! - Keep query helpers decoupled from facade wiring.

pub mod manager;
pub mod query;
