//! Catalog query helpers.
//!
//! # Responsibility
//! - Materialize filter/sort queries over registries and relation indexes.
//! - Build per-dish relationship snapshots for predicate evaluation.
//!
//! # Invariants
//! - Results are snapshots computed eagerly at call time; later mutation
//!   does not affect an already-returned sequence.
//! - Comparator sorting is stable; without a comparator the order is
//!   deterministic (relation order for related names, registry insertion
//!   order for dish scans).

use crate::repo::registry::EntityRegistry;
use crate::repo::relation::{OrderedRelation, RelationIndex};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Caller-supplied name comparator for sorted query results.
pub type Comparator<'a> = &'a dyn Fn(&str, &str) -> Ordering;

/// Relationship snapshot of one dish, handed to `find_dishes` predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishFacts {
    /// Dish name.
    pub name: String,
    /// Category names the dish belongs to.
    pub categories: BTreeSet<String>,
    /// Allergen names linked to the dish.
    pub allergens: BTreeSet<String>,
    /// Menu names the dish is a member of.
    pub menus: BTreeSet<String>,
}

/// Applies an optional stable sort to a name snapshot.
pub fn sorted_names(mut names: Vec<String>, sort: Option<Comparator>) -> Vec<String> {
    if let Some(compare) = sort {
        // sort_by is stable: ties keep their prior relative order.
        names.sort_by(|a, b| compare(a, b));
    }
    names
}

/// Builds the relationship snapshot for one dish name.
pub fn dish_facts(
    name: &str,
    categories: &RelationIndex,
    allergens: &RelationIndex,
    menus: &OrderedRelation,
) -> DishFacts {
    DishFacts {
        name: name.to_string(),
        categories: categories.lefts_of(name),
        allergens: allergens.lefts_of(name),
        menus: menus.menus_of(name),
    }
}

/// Scans every registered dish and keeps those whose facts satisfy the
/// predicate. The result is a call-time snapshot; each dish is visited
/// exactly once in registry insertion order.
pub fn find_dishes<P>(
    dishes: &EntityRegistry,
    categories: &RelationIndex,
    allergens: &RelationIndex,
    menus: &OrderedRelation,
    mut predicate: P,
    sort: Option<Comparator>,
) -> Vec<String>
where
    P: FnMut(&DishFacts) -> bool,
{
    let mut matched = Vec::new();
    for name in dishes.names() {
        let facts = dish_facts(&name, categories, allergens, menus);
        if predicate(&facts) {
            matched.push(name);
        }
    }
    sorted_names(matched, sort)
}
