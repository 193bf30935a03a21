//! Many-to-many relationship indexes.
//!
//! # Responsibility
//! - Track unordered associations between two entity families by name.
//! - Track position-ordered menu membership with swappable positions.
//!
//! # Invariants
//! - Both structures store names only; callers validate registry membership
//!   before mutating them.
//! - `OrderedRelation` positions are always a permutation of
//!   `0..member_count` within one menu; removal shifts later members down.
//! - Assignment is idempotent on both structures.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from ordered relation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationError {
    /// The dish is not a member of the menu.
    NotMember { menu: String, dish: String },
}

impl Display for RelationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotMember { menu, dish } => {
                write!(f, "dish `{dish}` is not part of menu `{menu}`")
            }
        }
    }
}

impl Error for RelationError {}

/// Unordered many-to-many association, indexed from both sides.
///
/// Left and right are role names chosen by the owner; for dish relations the
/// left side holds the category/allergen name and the right side the dish.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    forward: BTreeMap<String, BTreeSet<String>>,
    reverse: BTreeMap<String, BTreeSet<String>>,
}

impl RelationIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `left` with `right`. Returns whether the pair is new.
    pub fn assign(&mut self, left: &str, right: &str) -> bool {
        let newly_linked = self
            .forward
            .entry(left.to_string())
            .or_default()
            .insert(right.to_string());
        if newly_linked {
            self.reverse
                .entry(right.to_string())
                .or_default()
                .insert(left.to_string());
        }
        newly_linked
    }

    /// Removes the association if present. Returns whether a pair existed.
    pub fn deassign(&mut self, left: &str, right: &str) -> bool {
        let removed = match self.forward.get_mut(left) {
            Some(rights) => rights.remove(right),
            None => false,
        };
        if removed {
            if self.forward.get(left).is_some_and(BTreeSet::is_empty) {
                self.forward.remove(left);
            }
            if let Some(lefts) = self.reverse.get_mut(right) {
                lefts.remove(left);
                if lefts.is_empty() {
                    self.reverse.remove(right);
                }
            }
        }
        removed
    }

    /// Returns whether the pair is associated.
    pub fn contains(&self, left: &str, right: &str) -> bool {
        self.forward
            .get(left)
            .is_some_and(|rights| rights.contains(right))
    }

    /// Snapshot of all right-side names associated with `left`.
    pub fn rights_of(&self, left: &str) -> BTreeSet<String> {
        self.forward.get(left).cloned().unwrap_or_default()
    }

    /// Snapshot of all left-side names associated with `right`.
    pub fn lefts_of(&self, right: &str) -> BTreeSet<String> {
        self.reverse.get(right).cloned().unwrap_or_default()
    }

    /// Cascade: drops every pair whose left side is `left`.
    pub fn remove_left(&mut self, left: &str) {
        if let Some(rights) = self.forward.remove(left) {
            for right in rights {
                if let Some(lefts) = self.reverse.get_mut(&right) {
                    lefts.remove(left);
                    if lefts.is_empty() {
                        self.reverse.remove(&right);
                    }
                }
            }
        }
    }

    /// Cascade: drops every pair whose right side is `right`.
    pub fn remove_right(&mut self, right: &str) {
        if let Some(lefts) = self.reverse.remove(right) {
            for left in lefts {
                if let Some(rights) = self.forward.get_mut(&left) {
                    rights.remove(right);
                    if rights.is_empty() {
                        self.forward.remove(&left);
                    }
                }
            }
        }
    }

    /// Total number of associated pairs.
    pub fn len(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    /// Returns whether no pair is associated.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Menu-to-dish membership with a per-pair position.
///
/// The vector index is the position, so positions form a bijection of
/// `0..members.len()` by construction and swapping stays a bijection.
#[derive(Debug, Clone, Default)]
pub struct OrderedRelation {
    members: BTreeMap<String, Vec<String>>,
}

impl OrderedRelation {
    /// Creates an empty relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `dish` at the next free position of `menu` when not already a
    /// member. Returns whether the pair is new.
    pub fn assign(&mut self, menu: &str, dish: &str) -> bool {
        let list = self.members.entry(menu.to_string()).or_default();
        if list.iter().any(|member| member == dish) {
            return false;
        }
        list.push(dish.to_string());
        true
    }

    /// Removes `dish` from `menu`; later members shift one position down.
    /// Returns whether a membership existed.
    pub fn deassign(&mut self, menu: &str, dish: &str) -> bool {
        let Some(list) = self.members.get_mut(menu) else {
            return false;
        };
        let Some(position) = list.iter().position(|member| member == dish) else {
            return false;
        };
        list.remove(position);
        if list.is_empty() {
            self.members.remove(menu);
        }
        true
    }

    /// Returns whether `dish` is a member of `menu`.
    pub fn contains(&self, menu: &str, dish: &str) -> bool {
        self.members
            .get(menu)
            .is_some_and(|list| list.iter().any(|member| member == dish))
    }

    /// Position of `dish` within `menu`, when a member.
    pub fn position(&self, menu: &str, dish: &str) -> Option<usize> {
        self.members
            .get(menu)?
            .iter()
            .position(|member| member == dish)
    }

    /// Snapshot of `menu` members sorted ascending by position.
    pub fn members(&self, menu: &str) -> Vec<String> {
        self.members.get(menu).cloned().unwrap_or_default()
    }

    /// Snapshot of all menus `dish` belongs to.
    pub fn menus_of(&self, dish: &str) -> BTreeSet<String> {
        self.members
            .iter()
            .filter(|(_, list)| list.iter().any(|member| member == dish))
            .map(|(menu, _)| menu.clone())
            .collect()
    }

    /// Exchanges the positions of two members of `menu`.
    ///
    /// Applying the same swap twice restores the original arrangement.
    ///
    /// # Errors
    /// - `NotMember` naming the first dish that is not part of the menu.
    pub fn swap(&mut self, menu: &str, dish1: &str, dish2: &str) -> Result<(), RelationError> {
        let not_member = |dish: &str| RelationError::NotMember {
            menu: menu.to_string(),
            dish: dish.to_string(),
        };
        let list = self.members.get_mut(menu).ok_or_else(|| not_member(dish1))?;
        let first = list
            .iter()
            .position(|member| member == dish1)
            .ok_or_else(|| not_member(dish1))?;
        let second = list
            .iter()
            .position(|member| member == dish2)
            .ok_or_else(|| not_member(dish2))?;
        list.swap(first, second);
        Ok(())
    }

    /// Cascade: discards the whole membership of `menu`.
    pub fn remove_menu(&mut self, menu: &str) {
        self.members.remove(menu);
    }

    /// Cascade: removes `dish` from every menu, shifting later members down.
    pub fn remove_dish(&mut self, dish: &str) {
        self.members
            .values_mut()
            .for_each(|list| list.retain(|member| member != dish));
        self.members.retain(|_, list| !list.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::{OrderedRelation, RelationError, RelationIndex};

    #[test]
    fn relation_assign_is_idempotent_and_mirrored() {
        let mut index = RelationIndex::new();
        assert!(index.assign("entrante", "migas"));
        assert!(!index.assign("entrante", "migas"));
        assert_eq!(index.len(), 1);
        assert!(index.rights_of("entrante").contains("migas"));
        assert!(index.lefts_of("migas").contains("entrante"));
    }

    #[test]
    fn relation_deassign_round_trip_restores_empty_state() {
        let mut index = RelationIndex::new();
        index.assign("gluten", "macarrones");
        assert!(index.deassign("gluten", "macarrones"));
        assert!(!index.deassign("gluten", "macarrones"));
        assert!(index.is_empty());
        assert!(index.lefts_of("macarrones").is_empty());
    }

    #[test]
    fn relation_cascade_drops_both_directions() {
        let mut index = RelationIndex::new();
        index.assign("entrante", "migas");
        index.assign("entrante", "macarrones");
        index.assign("segundo", "macarrones");

        index.remove_right("macarrones");
        assert_eq!(index.len(), 1);
        assert!(index.rights_of("segundo").is_empty());

        index.remove_left("entrante");
        assert!(index.is_empty());
    }

    #[test]
    fn ordered_assign_appends_and_swap_is_an_involution() {
        let mut relation = OrderedRelation::new();
        relation.assign("primero", "d1");
        relation.assign("primero", "d2");
        relation.assign("primero", "d3");
        assert_eq!(relation.position("primero", "d3"), Some(2));

        relation.swap("primero", "d1", "d3").unwrap();
        assert_eq!(relation.members("primero"), ["d3", "d2", "d1"]);
        relation.swap("primero", "d1", "d3").unwrap();
        assert_eq!(relation.members("primero"), ["d1", "d2", "d3"]);
    }

    #[test]
    fn ordered_swap_names_the_missing_member() {
        let mut relation = OrderedRelation::new();
        relation.assign("primero", "d1");
        let err = relation.swap("primero", "d1", "d9").unwrap_err();
        assert_eq!(
            err,
            RelationError::NotMember {
                menu: "primero".to_string(),
                dish: "d9".to_string(),
            }
        );
    }

    #[test]
    fn ordered_removal_shifts_positions_down() {
        let mut relation = OrderedRelation::new();
        relation.assign("primero", "d1");
        relation.assign("primero", "d2");
        relation.assign("primero", "d3");

        relation.remove_dish("d2");
        assert_eq!(relation.members("primero"), ["d1", "d3"]);
        assert_eq!(relation.position("primero", "d3"), Some(1));

        relation.remove_menu("primero");
        assert!(relation.members("primero").is_empty());
    }
}
