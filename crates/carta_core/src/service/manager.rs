//! Restaurant catalog facade.
//!
//! # Responsibility
//! - Own one registry per entity kind plus the three relationship
//!   structures, and expose the full CRUD/assign/query surface.
//! - Validate registry membership before any relationship mutation.
//!
//! # Invariants
//! - Strict pre-registration: assign, deassign, reorder, and query paths all
//!   require entities to be registered; nothing is auto-created on assign.
//! - Removing an entity and cleaning its relationship entries happen
//!   together; a failed removal leaves no partial cascade.
//! - Bulk add/remove calls apply items independently: the first failing item
//!   aborts the call, earlier items stay applied.

use crate::model::entity::{Coordinate, Entity, EntityKind, EntityValidationError};
use crate::repo::registry::{EntityRegistry, RegistryError};
use crate::repo::relation::{OrderedRelation, RelationError, RelationIndex};
use crate::service::query::{self, Comparator, DishFacts};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors from manager operations.
#[derive(Debug)]
pub enum ManagerError {
    /// Registry-level failure (validation, duplicate, mismatch, not found).
    Registry(RegistryError),
    /// Wrong arity: an operation received an empty item or target list.
    InvalidArgument(&'static str),
    /// A position operation referenced a dish outside the menu.
    NotInMenu { menu: String, dish: String },
}

impl ManagerError {
    /// Returns whether this error is a registry `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::NotFound { .. }))
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotInMenu { menu, dish } => {
                write!(f, "dish `{dish}` is not part of menu `{menu}`")
            }
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for ManagerError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<EntityValidationError> for ManagerError {
    fn from(value: EntityValidationError) -> Self {
        Self::Registry(RegistryError::Validation(value))
    }
}

impl From<RelationError> for ManagerError {
    fn from(value: RelationError) -> Self {
        match value {
            RelationError::NotMember { menu, dish } => Self::NotInMenu { menu, dish },
        }
    }
}

/// Single-owner, in-memory restaurant catalog.
///
/// Construct one instance and pass it where needed; for process-wide sharing
/// wrap it in `Arc<Mutex<RestaurantManager>>` at application startup. Reads
/// return call-time snapshots, so a sequence obtained before a mutation stays
/// valid afterwards.
#[derive(Debug, Clone)]
pub struct RestaurantManager {
    dishes: EntityRegistry,
    categories: EntityRegistry,
    allergens: EntityRegistry,
    menus: EntityRegistry,
    restaurants: EntityRegistry,
    /// category name -> dish names
    dish_categories: RelationIndex,
    /// allergen name -> dish names
    dish_allergens: RelationIndex,
    /// menu name -> dish names, position-ordered
    menu_dishes: OrderedRelation,
}

impl Default for RestaurantManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RestaurantManager {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            dishes: EntityRegistry::new(EntityKind::Dish),
            categories: EntityRegistry::new(EntityKind::Category),
            allergens: EntityRegistry::new(EntityKind::Allergen),
            menus: EntityRegistry::new(EntityKind::Menu),
            restaurants: EntityRegistry::new(EntityKind::Restaurant),
            dish_categories: RelationIndex::new(),
            dish_allergens: RelationIndex::new(),
            menu_dishes: OrderedRelation::new(),
        }
    }

    fn registry(&self, kind: EntityKind) -> &EntityRegistry {
        match kind {
            EntityKind::Dish => &self.dishes,
            EntityKind::Category => &self.categories,
            EntityKind::Allergen => &self.allergens,
            EntityKind::Menu => &self.menus,
            EntityKind::Restaurant => &self.restaurants,
        }
    }

    fn registry_mut(&mut self, kind: EntityKind) -> &mut EntityRegistry {
        match kind {
            EntityKind::Dish => &mut self.dishes,
            EntityKind::Category => &mut self.categories,
            EntityKind::Allergen => &mut self.allergens,
            EntityKind::Menu => &mut self.menus,
            EntityKind::Restaurant => &mut self.restaurants,
        }
    }

    fn require_items<T>(items: &[T], message: &'static str) -> ManagerResult<()> {
        if items.is_empty() {
            return Err(ManagerError::InvalidArgument(message));
        }
        Ok(())
    }

    // ---- registration -----------------------------------------------------

    fn add_entities(
        &mut self,
        kind: EntityKind,
        entities: Vec<Entity>,
    ) -> ManagerResult<&mut Self> {
        Self::require_items(&entities, "at least one entity is required")?;
        for entity in entities {
            let name = entity.name.clone();
            if let Err(err) = self.registry_mut(kind).register(entity) {
                warn!("event=entity_registered kind={kind} name={name} status=error detail={err}");
                return Err(err.into());
            }
            debug!("event=entity_registered kind={kind} name={name} status=ok");
        }
        Ok(self)
    }

    /// Registers one or more dishes. Items are processed independently; the
    /// first invalid or duplicate item aborts the call with earlier items
    /// already registered.
    pub fn add_dishes(&mut self, dishes: Vec<Entity>) -> ManagerResult<&mut Self> {
        self.add_entities(EntityKind::Dish, dishes)
    }

    /// Registers one or more categories.
    pub fn add_categories(&mut self, categories: Vec<Entity>) -> ManagerResult<&mut Self> {
        self.add_entities(EntityKind::Category, categories)
    }

    /// Registers one or more allergens.
    pub fn add_allergens(&mut self, allergens: Vec<Entity>) -> ManagerResult<&mut Self> {
        self.add_entities(EntityKind::Allergen, allergens)
    }

    /// Registers one or more menus.
    pub fn add_menus(&mut self, menus: Vec<Entity>) -> ManagerResult<&mut Self> {
        self.add_entities(EntityKind::Menu, menus)
    }

    /// Registers one or more restaurants.
    pub fn add_restaurants(&mut self, restaurants: Vec<Entity>) -> ManagerResult<&mut Self> {
        self.add_entities(EntityKind::Restaurant, restaurants)
    }

    // ---- removal ----------------------------------------------------------

    fn remove_entities(&mut self, kind: EntityKind, names: &[&str]) -> ManagerResult<&mut Self> {
        Self::require_items(names, "at least one name is required")?;
        for name in names {
            self.registry_mut(kind).remove(name)?;
            // The cascade is infallible, so the entity and its relationship
            // entries disappear together once the registry removal succeeds.
            self.cascade_remove(kind, name);
            debug!("event=entity_removed kind={kind} name={name} status=ok");
        }
        Ok(self)
    }

    fn cascade_remove(&mut self, kind: EntityKind, name: &str) {
        match kind {
            EntityKind::Dish => {
                self.dish_categories.remove_right(name);
                self.dish_allergens.remove_right(name);
                self.menu_dishes.remove_dish(name);
            }
            EntityKind::Category => self.dish_categories.remove_left(name),
            EntityKind::Allergen => self.dish_allergens.remove_left(name),
            EntityKind::Menu => self.menu_dishes.remove_menu(name),
            EntityKind::Restaurant => {}
        }
    }

    /// Removes one or more dishes, cascading every category, allergen, and
    /// menu entry referencing them.
    pub fn remove_dishes(&mut self, names: &[&str]) -> ManagerResult<&mut Self> {
        self.remove_entities(EntityKind::Dish, names)
    }

    /// Removes one or more categories, unlinking them from every dish.
    pub fn remove_categories(&mut self, names: &[&str]) -> ManagerResult<&mut Self> {
        self.remove_entities(EntityKind::Category, names)
    }

    /// Removes one or more allergens, unlinking them from every dish.
    pub fn remove_allergens(&mut self, names: &[&str]) -> ManagerResult<&mut Self> {
        self.remove_entities(EntityKind::Allergen, names)
    }

    /// Removes one or more menus, discarding their ordered membership.
    pub fn remove_menus(&mut self, names: &[&str]) -> ManagerResult<&mut Self> {
        self.remove_entities(EntityKind::Menu, names)
    }

    /// Removes one or more restaurants.
    pub fn remove_restaurants(&mut self, names: &[&str]) -> ManagerResult<&mut Self> {
        self.remove_entities(EntityKind::Restaurant, names)
    }

    // ---- relationship assignment ------------------------------------------

    /// Links a category to one or more dishes. Idempotent per pair.
    pub fn assign_category_to_dishes(
        &mut self,
        category: &str,
        dishes: &[&str],
    ) -> ManagerResult<&mut Self> {
        Self::require_items(dishes, "at least one dish is required")?;
        self.categories.get(category)?;
        for dish in dishes {
            self.dishes.get(dish)?;
            if self.dish_categories.assign(category, dish) {
                debug!("event=category_linked category={category} dish={dish} status=ok");
            }
        }
        Ok(self)
    }

    /// Links an allergen to one or more dishes. Idempotent per pair.
    pub fn assign_allergen_to_dishes(
        &mut self,
        allergen: &str,
        dishes: &[&str],
    ) -> ManagerResult<&mut Self> {
        Self::require_items(dishes, "at least one dish is required")?;
        self.allergens.get(allergen)?;
        for dish in dishes {
            self.dishes.get(dish)?;
            if self.dish_allergens.assign(allergen, dish) {
                debug!("event=allergen_linked allergen={allergen} dish={dish} status=ok");
            }
        }
        Ok(self)
    }

    /// Adds a dish to one or more menus, appending at each menu's next free
    /// position. Idempotent per pair.
    pub fn assign_dish_to_menus(&mut self, dish: &str, menus: &[&str]) -> ManagerResult<&mut Self> {
        Self::require_items(menus, "at least one menu is required")?;
        self.dishes.get(dish)?;
        for menu in menus {
            self.menus.get(menu)?;
            if self.menu_dishes.assign(menu, dish) {
                debug!("event=menu_linked menu={menu} dish={dish} status=ok");
            }
        }
        Ok(self)
    }

    /// Unlinks a category from one or more dishes. Missing associations are
    /// tolerated; unregistered entities are errors.
    pub fn deassign_category_from_dishes(
        &mut self,
        category: &str,
        dishes: &[&str],
    ) -> ManagerResult<&mut Self> {
        Self::require_items(dishes, "at least one dish is required")?;
        self.categories.get(category)?;
        for dish in dishes {
            self.dishes.get(dish)?;
            if self.dish_categories.deassign(category, dish) {
                debug!("event=category_unlinked category={category} dish={dish} status=ok");
            }
        }
        Ok(self)
    }

    /// Unlinks an allergen from one or more dishes.
    pub fn deassign_allergen_from_dishes(
        &mut self,
        allergen: &str,
        dishes: &[&str],
    ) -> ManagerResult<&mut Self> {
        Self::require_items(dishes, "at least one dish is required")?;
        self.allergens.get(allergen)?;
        for dish in dishes {
            self.dishes.get(dish)?;
            if self.dish_allergens.deassign(allergen, dish) {
                debug!("event=allergen_unlinked allergen={allergen} dish={dish} status=ok");
            }
        }
        Ok(self)
    }

    /// Removes a dish from one or more menus; later members shift down so
    /// positions stay a permutation.
    pub fn deassign_dish_from_menus(
        &mut self,
        dish: &str,
        menus: &[&str],
    ) -> ManagerResult<&mut Self> {
        Self::require_items(menus, "at least one menu is required")?;
        self.dishes.get(dish)?;
        for menu in menus {
            self.menus.get(menu)?;
            if self.menu_dishes.deassign(menu, dish) {
                debug!("event=menu_unlinked menu={menu} dish={dish} status=ok");
            }
        }
        Ok(self)
    }

    /// Exchanges the positions of two dishes within a menu.
    pub fn swap_dishes_in_menu(
        &mut self,
        menu: &str,
        dish1: &str,
        dish2: &str,
    ) -> ManagerResult<&mut Self> {
        self.menus.get(menu)?;
        self.dishes.get(dish1)?;
        self.dishes.get(dish2)?;
        self.menu_dishes.swap(menu, dish1, dish2)?;
        debug!("event=menu_positions_swapped menu={menu} dish1={dish1} dish2={dish2} status=ok");
        Ok(self)
    }

    // ---- queries ----------------------------------------------------------

    /// Dish names of a menu in canonical display order (ascending position).
    pub fn dishes_in_menu(&self, menu: &str) -> ManagerResult<Vec<String>> {
        self.menus.get(menu)?;
        Ok(self.menu_dishes.members(menu))
    }

    /// Dish names linked to a category, optionally sorted by a comparator.
    pub fn dishes_in_category(
        &self,
        category: &str,
        sort: Option<Comparator>,
    ) -> ManagerResult<Vec<String>> {
        self.categories.get(category)?;
        let names = self.dish_categories.rights_of(category).into_iter().collect();
        Ok(query::sorted_names(names, sort))
    }

    /// Dish names linked to an allergen, optionally sorted by a comparator.
    pub fn dishes_with_allergen(
        &self,
        allergen: &str,
        sort: Option<Comparator>,
    ) -> ManagerResult<Vec<String>> {
        self.allergens.get(allergen)?;
        let names = self.dish_allergens.rights_of(allergen).into_iter().collect();
        Ok(query::sorted_names(names, sort))
    }

    /// Snapshot query over every registered dish's relationship facts.
    pub fn find_dishes<P>(&self, predicate: P, sort: Option<Comparator>) -> Vec<String>
    where
        P: FnMut(&DishFacts) -> bool,
    {
        query::find_dishes(
            &self.dishes,
            &self.dish_categories,
            &self.dish_allergens,
            &self.menu_dishes,
            predicate,
            sort,
        )
    }

    /// Relationship snapshot of one registered dish.
    pub fn dish_facts(&self, name: &str) -> ManagerResult<DishFacts> {
        self.dishes.get(name)?;
        Ok(query::dish_facts(
            name,
            &self.dish_categories,
            &self.dish_allergens,
            &self.menu_dishes,
        ))
    }

    // ---- get-or-create constructors ---------------------------------------

    /// Returns the registered dish of that name, creating it when absent.
    pub fn create_dish(&mut self, name: &str) -> ManagerResult<Entity> {
        Ok(self.dishes.get_or_create(name)?)
    }

    /// Returns the registered category of that name, creating it when absent.
    pub fn create_category(&mut self, name: &str) -> ManagerResult<Entity> {
        Ok(self.categories.get_or_create(name)?)
    }

    /// Returns the registered allergen of that name, creating it when absent.
    pub fn create_allergen(&mut self, name: &str) -> ManagerResult<Entity> {
        Ok(self.allergens.get_or_create(name)?)
    }

    /// Returns the registered menu of that name, creating it when absent.
    pub fn create_menu(&mut self, name: &str) -> ManagerResult<Entity> {
        Ok(self.menus.get_or_create(name)?)
    }

    /// Returns the registered restaurant of that name, creating it when
    /// absent.
    pub fn create_restaurant(&mut self, name: &str) -> ManagerResult<Entity> {
        Ok(self.restaurants.get_or_create(name)?)
    }

    // ---- snapshots --------------------------------------------------------

    /// Insertion-order snapshot of all dishes.
    pub fn dishes(&self) -> Vec<Entity> {
        self.dishes.entities()
    }

    /// Insertion-order snapshot of all categories.
    pub fn categories(&self) -> Vec<Entity> {
        self.categories.entities()
    }

    /// Insertion-order snapshot of all allergens.
    pub fn allergens(&self) -> Vec<Entity> {
        self.allergens.entities()
    }

    /// Insertion-order snapshot of all menus.
    pub fn menus(&self) -> Vec<Entity> {
        self.menus.entities()
    }

    /// Insertion-order snapshot of all restaurants.
    pub fn restaurants(&self) -> Vec<Entity> {
        self.restaurants.entities()
    }

    /// Gets one registered entity by kind and name.
    pub fn get(&self, kind: EntityKind, name: &str) -> ManagerResult<Entity> {
        Ok(self.registry(kind).get(name)?.clone())
    }

    // ---- field updates ----------------------------------------------------

    /// Replaces the description of a registered entity.
    pub fn update_description(
        &mut self,
        kind: EntityKind,
        name: &str,
        description: &str,
    ) -> ManagerResult<&mut Self> {
        let entity = self.registry_mut(kind).get_mut(name)?;
        entity.description = description.to_string();
        Ok(self)
    }

    /// Replaces the ingredients text of a registered dish.
    pub fn update_dish_ingredients(
        &mut self,
        name: &str,
        ingredients: &str,
    ) -> ManagerResult<&mut Self> {
        let dish = self.dishes.get_mut(name)?;
        dish.ingredients = Some(ingredients.to_string());
        Ok(self)
    }

    /// Replaces the image reference of a registered dish.
    pub fn update_dish_image(&mut self, name: &str, image: &str) -> ManagerResult<&mut Self> {
        let dish = self.dishes.get_mut(name)?;
        dish.image = Some(image.to_string());
        Ok(self)
    }

    /// Replaces the location of a registered restaurant.
    pub fn update_restaurant_location(
        &mut self,
        name: &str,
        location: Coordinate,
    ) -> ManagerResult<&mut Self> {
        location.validate()?;
        let restaurant = self.restaurants.get_mut(name)?;
        restaurant.location = Some(location);
        Ok(self)
    }
}
