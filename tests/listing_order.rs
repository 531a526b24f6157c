//! Listing order and redaction tests
//!
//! - public order: pinned desc, pinned_at asc, category name asc
//! - owner order: pinned desc, pinned_at asc
//! - product order: explicit `order` asc, insertion-stable ties
//! - no read ever exposes the owner identifier

use std::sync::Arc;

use dishboard::listing::ListingReader;
use dishboard::model::{NewRestaurant, Product, RestaurantCategory};
use dishboard::pin::PinManager;
use dishboard::store::{RestaurantTable, StoreError};
use uuid::Uuid;

fn open_table() -> (tempfile::TempDir, Arc<RestaurantTable>) {
    let dir = tempfile::tempdir().unwrap();
    let table = Arc::new(RestaurantTable::open(dir.path()).unwrap());
    (dir, table)
}

fn new_restaurant(name: &str, category: &str, products: Vec<Product>) -> NewRestaurant {
    NewRestaurant {
        name: name.to_string(),
        description: None,
        address: "addr".to_string(),
        shipping_costs: 1.0,
        pinned: false,
        category: RestaurantCategory {
            id: Uuid::new_v4(),
            name: category.to_string(),
        },
        products,
    }
}

fn product(name: &str, order: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: 9.0,
        order,
    }
}

/// R1 pinned earlier ranks above R2 pinned later, both above unpinned R3.
#[test]
fn test_public_order_pin_recency() {
    let (_dir, table) = open_table();
    let owner = Uuid::new_v4();
    let pins = PinManager::new(Arc::clone(&table));
    let reader = ListingReader::new(Arc::clone(&table));

    let r1 = table.create(owner, new_restaurant("r1", "Same", Vec::new())).unwrap();
    let r2 = table.create(owner, new_restaurant("r2", "Same", Vec::new())).unwrap();
    table.create(owner, new_restaurant("r3", "Same", Vec::new())).unwrap();

    pins.toggle_pin(owner, r1.id).unwrap();
    pins.toggle_pin(owner, r2.id).unwrap();

    let listing = reader.list_public().unwrap();
    assert_eq!(listing[0].name, "r1");
    assert_eq!(listing[1].name, "r2");
    assert_eq!(listing[2].name, "r3");
}

/// Among unpinned rows the public order falls back to category name.
#[test]
fn test_public_order_category_fallback() {
    let (_dir, table) = open_table();
    let owner = Uuid::new_v4();
    let reader = ListingReader::new(Arc::clone(&table));

    table.create(owner, new_restaurant("s", "Sushi", Vec::new())).unwrap();
    table.create(owner, new_restaurant("b", "Burgers", Vec::new())).unwrap();
    table.create(owner, new_restaurant("p", "Pizza", Vec::new())).unwrap();

    let listing = reader.list_public().unwrap();
    let categories: Vec<&str> = listing.iter().map(|r| r.category.name.as_str()).collect();
    assert_eq!(categories, vec!["Burgers", "Pizza", "Sushi"]);
}

/// The owner listing orders by pin state and recency; categories are
/// arranged adversarially to show they carry no weight there.
#[test]
fn test_owner_order_pinned_first() {
    let (_dir, table) = open_table();
    let owner = Uuid::new_v4();
    let pins = PinManager::new(Arc::clone(&table));
    let reader = ListingReader::new(Arc::clone(&table));

    let late = table.create(owner, new_restaurant("late", "Aaa", Vec::new())).unwrap();
    let early = table.create(owner, new_restaurant("early", "Zzz", Vec::new())).unwrap();
    table.create(owner, new_restaurant("unpinned", "Aaa", Vec::new())).unwrap();

    pins.toggle_pin(owner, early.id).unwrap();
    pins.toggle_pin(owner, late.id).unwrap();

    let listing = reader.list_owner(owner).unwrap();
    assert_eq!(listing[0].name, "early");
    assert_eq!(listing[1].name, "late");
    assert_eq!(listing[2].name, "unpinned");
}

/// The owner listing only contains the actor's rows.
#[test]
fn test_owner_listing_is_scoped() {
    let (_dir, table) = open_table();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();
    let reader = ListingReader::new(Arc::clone(&table));

    table.create(owner, new_restaurant("mine", "Cat", Vec::new())).unwrap();
    table.create(other, new_restaurant("theirs", "Cat", Vec::new())).unwrap();

    let listing = reader.list_owner(owner).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "mine");
}

/// Products come back in explicit menu order, ties insertion-stable.
#[test]
fn test_single_restaurant_product_order() {
    let (_dir, table) = open_table();
    let owner = Uuid::new_v4();
    let reader = ListingReader::new(Arc::clone(&table));

    let products = vec![
        product("late", 5),
        product("tie-a", 2),
        product("tie-b", 2),
        product("early", 1),
    ];
    let created = table
        .create(owner, new_restaurant("menu", "Cat", products))
        .unwrap();

    let view = reader.get(created.id).unwrap();
    let names: Vec<&str> = view.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["early", "tie-a", "tie-b", "late"]);
}

/// Unknown restaurant id on the single view is NotFound.
#[test]
fn test_get_missing_restaurant() {
    let (_dir, table) = open_table();
    let reader = ListingReader::new(Arc::clone(&table));
    let missing = Uuid::new_v4();
    assert_eq!(reader.get(missing).unwrap_err(), StoreError::NotFound(missing));
}

/// Empty table: empty listings, no errors.
#[test]
fn test_empty_collections_are_fine() {
    let (_dir, table) = open_table();
    let reader = ListingReader::new(Arc::clone(&table));
    assert!(reader.list_public().unwrap().is_empty());
    assert!(reader.list_owner(Uuid::new_v4()).unwrap().is_empty());
}

/// No serialized read contains an owner identifier, public or owner-scoped.
#[test]
fn test_reads_redact_owner_id() {
    let (_dir, table) = open_table();
    let owner = Uuid::new_v4();
    let reader = ListingReader::new(Arc::clone(&table));
    let created = table
        .create(owner, new_restaurant("r", "Cat", Vec::new()))
        .unwrap();

    let public = serde_json::to_string(&reader.list_public().unwrap()).unwrap();
    let mine = serde_json::to_string(&reader.list_owner(owner).unwrap()).unwrap();
    let single = serde_json::to_string(&reader.get(created.id).unwrap()).unwrap();

    for body in [public, mine, single] {
        assert!(!body.contains("owner_id"));
        assert!(!body.contains(&owner.to_string()));
    }
}
