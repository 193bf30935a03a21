//! Catalog entity model.
//!
//! # Responsibility
//! - Define the canonical record shared by dish/category/allergen/menu/
//!   restaurant projections.
//! - Enforce the construction contract: a name must be non-blank.
//!
//! # Invariants
//! - `name` is the stable identity within one registry; it is never trimmed
//!   or case-folded on storage.
//! - Kind-specific fields (`ingredients`, `image`, `location`) must be `None`
//!   on kinds they do not belong to.
//! - `location`, when present, carries finite in-range coordinates.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unified category for all catalog entity projections.
///
/// A single `Entity` shape can be rendered by different views, but still
/// keeps one canonical identity and lifecycle in the registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A dish served by the restaurant.
    Dish,
    /// A grouping label for dishes (starter, main, ...).
    Category,
    /// A substance a dish may contain that diners must be warned about.
    Allergen,
    /// A named, ordered selection of dishes.
    Menu,
    /// A physical restaurant with a geographic location.
    Restaurant,
}

impl EntityKind {
    /// Lowercase label used in error messages and log events.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dish => "dish",
            Self::Category => "category",
            Self::Allergen => "allergen",
            Self::Menu => "menu",
            Self::Restaurant => "restaurant",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Geographic position of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north, in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east, in `[-180, 180]`.
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a validated coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, EntityValidationError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks both components are finite and inside their valid range.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if !self.latitude.is_finite() || self.latitude.abs() > 90.0 {
            return Err(EntityValidationError::InvalidCoordinate {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || self.longitude.abs() > 180.0 {
            return Err(EntityValidationError::InvalidCoordinate {
                field: "longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "latitude {} longitude {}", self.latitude, self.longitude)
    }
}

/// Validation error for entity construction and write paths.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityValidationError {
    /// Name is missing, empty, or blank after trimming.
    NameRequired { kind: EntityKind },
    /// Coordinate component is non-finite or out of range.
    InvalidCoordinate { field: &'static str, value: f64 },
    /// A kind-specific field is set on an entity of a foreign kind.
    ForeignField { kind: EntityKind, field: &'static str },
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired { kind } => write!(f, "{kind} must have a non-blank name"),
            Self::InvalidCoordinate { field, value } => {
                write!(f, "invalid coordinate {field}: {value}")
            }
            Self::ForeignField { kind, field } => {
                write!(f, "field `{field}` is not valid for a {kind}")
            }
        }
    }
}

impl Error for EntityValidationError {}

/// Canonical record for all catalog entities.
///
/// This model intentionally keeps kind-specific fields optional, so one
/// storage shape can support five projections without data copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Case-sensitive identity, unique within the entity's registry.
    pub name: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Free-form description, empty by default.
    pub description: String,
    /// Meaningful only when `kind == EntityKind::Dish`.
    pub ingredients: Option<String>,
    /// Meaningful only when `kind == EntityKind::Dish`.
    pub image: Option<String>,
    /// Meaningful only when `kind == EntityKind::Restaurant`.
    pub location: Option<Coordinate>,
}

impl Entity {
    /// Creates an entity of the given kind with default projection fields.
    ///
    /// # Errors
    /// - `NameRequired` when the name is empty or blank after trimming.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Result<Self, EntityValidationError> {
        let entity = Self {
            name: name.into(),
            kind,
            description: String::new(),
            ingredients: None,
            image: None,
            location: None,
        };
        entity.validate()?;
        Ok(entity)
    }

    /// Creates a dish entity.
    pub fn dish(name: impl Into<String>) -> Result<Self, EntityValidationError> {
        Self::new(EntityKind::Dish, name)
    }

    /// Creates a category entity.
    pub fn category(name: impl Into<String>) -> Result<Self, EntityValidationError> {
        Self::new(EntityKind::Category, name)
    }

    /// Creates an allergen entity.
    pub fn allergen(name: impl Into<String>) -> Result<Self, EntityValidationError> {
        Self::new(EntityKind::Allergen, name)
    }

    /// Creates a menu entity.
    pub fn menu(name: impl Into<String>) -> Result<Self, EntityValidationError> {
        Self::new(EntityKind::Menu, name)
    }

    /// Creates a restaurant entity.
    pub fn restaurant(name: impl Into<String>) -> Result<Self, EntityValidationError> {
        Self::new(EntityKind::Restaurant, name)
    }

    /// Re-checks model invariants; registry write paths call this before
    /// storing an entity.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if self.name.trim().is_empty() {
            return Err(EntityValidationError::NameRequired { kind: self.kind });
        }
        if self.ingredients.is_some() && self.kind != EntityKind::Dish {
            return Err(EntityValidationError::ForeignField {
                kind: self.kind,
                field: "ingredients",
            });
        }
        if self.image.is_some() && self.kind != EntityKind::Dish {
            return Err(EntityValidationError::ForeignField {
                kind: self.kind,
                field: "image",
            });
        }
        if let Some(location) = &self.location {
            if self.kind != EntityKind::Restaurant {
                return Err(EntityValidationError::ForeignField {
                    kind: self.kind,
                    field: "location",
                });
            }
            location.validate()?;
        }
        Ok(())
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.name, self.description)?;
        if let Some(ingredients) = &self.ingredients {
            write!(f, " | ingredients: {ingredients}")?;
        }
        if let Some(image) = &self.image {
            write!(f, " | image: {image}")?;
        }
        if let Some(location) = &self.location {
            write!(f, " | {location}")?;
        }
        Ok(())
    }
}
