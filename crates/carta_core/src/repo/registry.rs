//! Name-keyed entity registry.
//!
//! # Responsibility
//! - Store all entities of one kind under their unique names.
//! - Enforce name uniqueness and kind membership on every write.
//!
//! # Invariants
//! - Iteration follows insertion order; removal does not reorder survivors.
//! - Snapshots (`entities()`, `names()`) are materialized at call time and
//!   unaffected by later mutation.

use crate::model::entity::{Entity, EntityKind, EntityValidationError};
use indexmap::IndexMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors from registry operations.
#[derive(Debug)]
pub enum RegistryError {
    /// Entity failed model validation.
    Validation(EntityValidationError),
    /// An entity with the same name is already registered.
    Duplicate { kind: EntityKind, name: String },
    /// The entity's kind does not match the registry's kind.
    TypeMismatch {
        expected: EntityKind,
        actual: EntityKind,
    },
    /// No entity with the given name is registered.
    NotFound { kind: EntityKind, name: String },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate { kind, name } => {
                write!(f, "{kind} `{name}` already exists in the catalog")
            }
            Self::TypeMismatch { expected, actual } => {
                write!(f, "expected a {expected}, got a {actual}")
            }
            Self::NotFound { kind, name } => write!(f, "{kind} not found: `{name}`"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntityValidationError> for RegistryError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

/// In-memory, insertion-ordered store for entities of one kind.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    kind: EntityKind,
    entries: IndexMap<String, Entity>,
}

impl EntityRegistry {
    /// Creates an empty registry accepting only entities of `kind`.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Entity kind accepted by this registry.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Registers one entity under its name.
    ///
    /// # Errors
    /// - `Validation` when the entity fails model invariants.
    /// - `TypeMismatch` when the entity is of a foreign kind.
    /// - `Duplicate` when the name is already registered.
    pub fn register(&mut self, entity: Entity) -> RegistryResult<()> {
        entity.validate()?;
        if entity.kind != self.kind {
            return Err(RegistryError::TypeMismatch {
                expected: self.kind,
                actual: entity.kind,
            });
        }
        if self.entries.contains_key(&entity.name) {
            return Err(RegistryError::Duplicate {
                kind: self.kind,
                name: entity.name,
            });
        }
        self.entries.insert(entity.name.clone(), entity);
        Ok(())
    }

    /// Removes and returns the entity stored under `name`.
    pub fn remove(&mut self, name: &str) -> RegistryResult<Entity> {
        // shift_remove keeps insertion order for the surviving entries.
        self.entries
            .shift_remove(name)
            .ok_or_else(|| RegistryError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Gets the entity stored under `name`.
    pub fn get(&self, name: &str) -> RegistryResult<&Entity> {
        self.entries.get(name).ok_or_else(|| RegistryError::NotFound {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    /// Gets a mutable handle to the entity stored under `name`.
    pub fn get_mut(&mut self, name: &str) -> RegistryResult<&mut Entity> {
        let kind = self.kind;
        self.entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    /// Returns whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the existing entity, or registers a fresh default one.
    ///
    /// Idempotent: repeated calls with the same name return the stored
    /// entity, including any description updates applied since creation.
    pub fn get_or_create(&mut self, name: &str) -> RegistryResult<Entity> {
        if let Some(existing) = self.entries.get(name) {
            return Ok(existing.clone());
        }
        let entity = Entity::new(self.kind, name)?;
        self.entries.insert(entity.name.clone(), entity.clone());
        Ok(entity)
    }

    /// Snapshot of all entities in insertion order.
    pub fn entities(&self) -> Vec<Entity> {
        self.entries.values().cloned().collect()
    }

    /// Snapshot of all registered names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
