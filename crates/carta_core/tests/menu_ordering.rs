use carta_core::{Entity, ManagerError, RestaurantManager};

fn menu_with_dishes(dishes: &[&str]) -> RestaurantManager {
    let mut manager = RestaurantManager::new();
    manager
        .add_menus(vec![Entity::menu("primero").unwrap()])
        .unwrap();
    for dish in dishes {
        manager.add_dishes(vec![Entity::dish(*dish).unwrap()]).unwrap();
        manager.assign_dish_to_menus(dish, &["primero"]).unwrap();
    }
    manager
}

#[test]
fn assignment_order_is_the_canonical_menu_order() {
    let manager = menu_with_dishes(&["d1", "d2", "d3"]);
    assert_eq!(manager.dishes_in_menu("primero").unwrap(), ["d1", "d2", "d3"]);
}

#[test]
fn repeated_menu_assignment_keeps_the_original_position() {
    let mut manager = menu_with_dishes(&["d1", "d2"]);
    manager.assign_dish_to_menus("d1", &["primero"]).unwrap();
    assert_eq!(manager.dishes_in_menu("primero").unwrap(), ["d1", "d2"]);
}

#[test]
fn swap_exchanges_positions_and_is_an_involution() {
    let mut manager = menu_with_dishes(&["d1", "d2"]);

    manager.swap_dishes_in_menu("primero", "d1", "d2").unwrap();
    assert_eq!(manager.dishes_in_menu("primero").unwrap(), ["d2", "d1"]);

    manager.swap_dishes_in_menu("primero", "d1", "d2").unwrap();
    assert_eq!(manager.dishes_in_menu("primero").unwrap(), ["d1", "d2"]);
}

#[test]
fn swap_requires_registered_menu_and_dishes() {
    let mut manager = menu_with_dishes(&["d1", "d2"]);

    let err = manager.swap_dishes_in_menu("otro", "d1", "d2").unwrap_err();
    assert!(err.is_not_found());

    let err = manager.swap_dishes_in_menu("primero", "d1", "d9").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn swap_requires_both_dishes_to_be_menu_members() {
    let mut manager = menu_with_dishes(&["d1"]);
    manager.add_dishes(vec![Entity::dish("d2").unwrap()]).unwrap();

    let err = manager.swap_dishes_in_menu("primero", "d1", "d2").unwrap_err();
    assert!(matches!(
        err,
        ManagerError::NotInMenu { ref menu, ref dish } if menu == "primero" && dish == "d2"
    ));
}

#[test]
fn deassigning_a_dish_shifts_later_positions_down() {
    let mut manager = menu_with_dishes(&["d1", "d2", "d3"]);
    manager.deassign_dish_from_menus("d2", &["primero"]).unwrap();
    assert_eq!(manager.dishes_in_menu("primero").unwrap(), ["d1", "d3"]);

    // Deassigning again is a tolerated no-op.
    manager.deassign_dish_from_menus("d2", &["primero"]).unwrap();
    assert_eq!(manager.dishes_in_menu("primero").unwrap(), ["d1", "d3"]);
}

#[test]
fn menu_removal_discards_its_membership() {
    let mut manager = menu_with_dishes(&["d1", "d2"]);
    manager.remove_menus(&["primero"]).unwrap();
    assert!(manager.dishes_in_menu("primero").unwrap_err().is_not_found());

    manager.add_menus(vec![Entity::menu("primero").unwrap()]).unwrap();
    assert!(manager.dishes_in_menu("primero").unwrap().is_empty());
    assert!(manager.dish_facts("d1").unwrap().menus.is_empty());
}
