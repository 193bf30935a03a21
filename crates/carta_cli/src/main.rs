//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `carta_core` linkage.
//! - Seed a tiny catalog and keep output deterministic for quick local
//!   sanity checks.

use carta_core::{Entity, RestaurantManager};

fn main() {
    if let Err(err) = run() {
        eprintln!("carta_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("carta_core version={}", carta_core::core_version());

    let mut manager = RestaurantManager::new();
    manager
        .add_categories(vec![Entity::category("entrante")?, Entity::category("segundo")?])?
        .add_dishes(vec![Entity::dish("macarrones")?, Entity::dish("migas")?])?
        .add_menus(vec![Entity::menu("primero")?])?;
    manager
        .assign_category_to_dishes("entrante", &["macarrones", "migas"])?
        .assign_category_to_dishes("segundo", &["macarrones"])?
        .assign_dish_to_menus("macarrones", &["primero"])?
        .assign_dish_to_menus("migas", &["primero"])?;

    for category in manager.categories() {
        println!("{category}");
    }
    println!(
        "dishes in entrante: {}",
        manager.dishes_in_category("entrante", None)?.join(", ")
    );
    println!(
        "menu primero: {}",
        manager.dishes_in_menu("primero")?.join(", ")
    );
    Ok(())
}
