use carta_core::{Entity, RestaurantManager};
use std::collections::BTreeSet;

fn seeded_manager() -> RestaurantManager {
    let mut manager = RestaurantManager::new();
    manager
        .add_dishes(vec![
            Entity::dish("migas").unwrap(),
            Entity::dish("macarrones").unwrap(),
            Entity::dish("croquetas").unwrap(),
        ])
        .unwrap()
        .add_categories(vec![Entity::category("entrante").unwrap()])
        .unwrap()
        .add_allergens(vec![Entity::allergen("gluten").unwrap()])
        .unwrap()
        .add_menus(vec![Entity::menu("primero").unwrap()])
        .unwrap();
    manager
        .assign_category_to_dishes("entrante", &["migas", "croquetas"])
        .unwrap()
        .assign_allergen_to_dishes("gluten", &["macarrones", "croquetas"])
        .unwrap()
        .assign_dish_to_menus("migas", &["primero"])
        .unwrap();
    manager
}

#[test]
fn relation_queries_are_deterministic_without_a_comparator() {
    let manager = seeded_manager();
    assert_eq!(
        manager.dishes_in_category("entrante", None).unwrap(),
        ["croquetas", "migas"]
    );
    assert_eq!(
        manager.dishes_with_allergen("gluten", None).unwrap(),
        ["croquetas", "macarrones"]
    );
}

#[test]
fn relation_queries_apply_the_supplied_comparator() {
    let manager = seeded_manager();
    let reversed = manager
        .dishes_in_category("entrante", Some(&|a, b| b.cmp(a)))
        .unwrap();
    assert_eq!(reversed, ["migas", "croquetas"]);
}

#[test]
fn relation_queries_reject_unregistered_targets() {
    let manager = seeded_manager();
    assert!(manager.dishes_in_category("postre", None).unwrap_err().is_not_found());
    assert!(manager.dishes_with_allergen("soja", None).unwrap_err().is_not_found());
}

#[test]
fn find_dishes_with_constant_predicates() {
    let manager = seeded_manager();

    assert!(manager.find_dishes(|_| false, None).is_empty());

    let all = manager.find_dishes(|_| true, None);
    assert_eq!(all, ["migas", "macarrones", "croquetas"]);
    let unique: BTreeSet<&str> = all.iter().map(String::as_str).collect();
    assert_eq!(unique.len(), all.len());
}

#[test]
fn find_dishes_filters_on_relationship_facts() {
    let manager = seeded_manager();

    let gluten_free = manager.find_dishes(|facts| !facts.allergens.contains("gluten"), None);
    assert_eq!(gluten_free, ["migas"]);

    let entrante_with_gluten = manager.find_dishes(
        |facts| facts.categories.contains("entrante") && facts.allergens.contains("gluten"),
        None,
    );
    assert_eq!(entrante_with_gluten, ["croquetas"]);

    let on_menu = manager.find_dishes(|facts| !facts.menus.is_empty(), None);
    assert_eq!(on_menu, ["migas"]);
}

#[test]
fn find_dishes_applies_a_stable_sort() {
    let manager = seeded_manager();
    // Compare only the first letter: "migas" and "macarrones" tie and must
    // keep their prior relative order (registry insertion order).
    let sorted = manager.find_dishes(|_| true, Some(&|a, b| a[..1].cmp(&b[..1])));
    assert_eq!(sorted, ["croquetas", "migas", "macarrones"]);
}

#[test]
fn query_results_are_call_time_snapshots() {
    let mut manager = seeded_manager();

    let before = manager.dishes_in_category("entrante", None).unwrap();
    let facts_before = manager.dish_facts("croquetas").unwrap();
    manager.remove_dishes(&["croquetas"]).unwrap();

    assert_eq!(before, ["croquetas", "migas"]);
    assert!(facts_before.categories.contains("entrante"));
    assert_eq!(manager.dishes_in_category("entrante", None).unwrap(), ["migas"]);
}
