//! # Pin Manager
//!
//! Toggles a restaurant's `pinned` flag and its `pinned_at` timestamp.
//!
//! Both fields change together inside one write transaction, so no
//! reader can ever observe `pinned == true` with a missing timestamp or
//! the reverse. There is no cross-row interaction; the operation is
//! local to one record.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::model::Restaurant;
use crate::observability::{log_error, log_info};
use crate::store::{RestaurantTable, StoreError, StoreResult};

/// Toggles pin state on single restaurants.
pub struct PinManager {
    table: Arc<RestaurantTable>,
}

impl PinManager {
    pub fn new(table: Arc<RestaurantTable>) -> Self {
        Self { table }
    }

    /// Flips the restaurant's `pinned` flag.
    ///
    /// Pinning sets `pinned_at` to the operation time; unpinning clears
    /// it. Only the owner may toggle (the upstream system left this
    /// gate open on toggle while closing it on promote; this crate
    /// applies the same gate to both).
    pub fn toggle_pin(&self, actor_id: Uuid, restaurant_id: Uuid) -> StoreResult<Restaurant> {
        let mut tx = self.table.begin_write()?;

        let row = tx
            .get(restaurant_id)
            .cloned()
            .ok_or(StoreError::NotFound(restaurant_id))?;
        if row.owner_id != actor_id {
            return Err(StoreError::Forbidden {
                actor: actor_id,
                restaurant: restaurant_id,
            });
        }

        let mut updated = row;
        updated.pinned = !updated.pinned;
        updated.pinned_at = if updated.pinned { Some(Utc::now()) } else { None };
        let result = tx.stage(updated).clone();

        if let Err(e) = tx.commit() {
            log_error(
                "pin.commit_failed",
                &[
                    ("code", e.code()),
                    ("restaurant_id", &restaurant_id.to_string()),
                ],
            );
            return Err(e);
        }

        log_info(
            "pin.toggled",
            &[
                ("pinned", if result.pinned { "true" } else { "false" }),
                ("restaurant_id", &restaurant_id.to_string()),
            ],
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewRestaurant, RestaurantCategory};

    fn manager() -> (tempfile::TempDir, PinManager, Arc<RestaurantTable>) {
        let dir = tempfile::tempdir().unwrap();
        let table = Arc::new(RestaurantTable::open(dir.path()).unwrap());
        (dir, PinManager::new(Arc::clone(&table)), table)
    }

    fn create(table: &RestaurantTable, owner: Uuid) -> Restaurant {
        table
            .create(
                owner,
                NewRestaurant {
                    name: "r".to_string(),
                    description: None,
                    address: "addr".to_string(),
                    shipping_costs: 0.0,
                    pinned: false,
                    category: RestaurantCategory {
                        id: Uuid::new_v4(),
                        name: "Tapas".to_string(),
                    },
                    products: Vec::new(),
                },
            )
            .unwrap()
    }

    #[test]
    fn test_toggle_pins_then_unpins() {
        let (_dir, pins, table) = manager();
        let owner = Uuid::new_v4();
        let row = create(&table, owner);

        let pinned = pins.toggle_pin(owner, row.id).unwrap();
        assert!(pinned.pinned);
        assert!(pinned.pinned_at.is_some());
        assert_eq!(table.get(row.id).unwrap(), pinned);

        let unpinned = pins.toggle_pin(owner, row.id).unwrap();
        assert!(!unpinned.pinned);
        assert_eq!(unpinned.pinned_at, None);
    }

    #[test]
    fn test_repin_refreshes_timestamp() {
        let (_dir, pins, table) = manager();
        let owner = Uuid::new_v4();
        let row = create(&table, owner);

        let first = pins.toggle_pin(owner, row.id).unwrap();
        pins.toggle_pin(owner, row.id).unwrap();
        let second = pins.toggle_pin(owner, row.id).unwrap();

        assert!(second.pinned_at.unwrap() >= first.pinned_at.unwrap());
    }

    #[test]
    fn test_toggle_missing_restaurant() {
        let (_dir, pins, _table) = manager();
        let id = Uuid::new_v4();
        let err = pins.toggle_pin(Uuid::new_v4(), id).unwrap_err();
        assert_eq!(err, StoreError::NotFound(id));
    }

    #[test]
    fn test_toggle_by_non_owner_is_forbidden() {
        let (_dir, pins, table) = manager();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let row = create(&table, owner);

        let err = pins.toggle_pin(stranger, row.id).unwrap_err();
        assert!(matches!(err, StoreError::Forbidden { .. }));
        assert!(!table.get(row.id).unwrap().pinned);
    }
}
