//! Read path: ordered, redacted restaurant views
//!
//! Reads never mutate and never block writers beyond the table's read
//! lock; they see pre- or post-commit state, never a torn one. Every
//! materialized collection is verified against I1/I2 before it leaves
//! the store; a violation here means a mutator is broken and is
//! surfaced as a fatal data fault rather than papered over.

use std::sync::Arc;

use uuid::Uuid;

use super::orderer::ListingOrderer;
use crate::model::RestaurantView;
use crate::store::{check_invariants, RestaurantTable, StoreResult};

/// Serves the listing and single-restaurant reads.
pub struct ListingReader {
    table: Arc<RestaurantTable>,
}

impl ListingReader {
    pub fn new(table: Arc<RestaurantTable>) -> Self {
        Self { table }
    }

    /// Public listing: every restaurant, public order, owner redacted.
    pub fn list_public(&self) -> StoreResult<Vec<RestaurantView>> {
        let mut rows = self.table.snapshot()?;
        check_invariants(rows.iter())?;
        ListingOrderer::order_public(&mut rows);
        Ok(rows.iter().map(|r| r.to_view()).collect())
    }

    /// Owner listing: the actor's restaurants, owner order, redacted
    /// like every other read.
    pub fn list_owner(&self, actor_id: Uuid) -> StoreResult<Vec<RestaurantView>> {
        let mut rows = self.table.snapshot()?;
        check_invariants(rows.iter())?;
        rows.retain(|r| r.owner_id == actor_id);
        ListingOrderer::order_owner(&mut rows);
        Ok(rows.iter().map(|r| r.to_view()).collect())
    }

    /// Single restaurant with its products in explicit menu order.
    pub fn get(&self, restaurant_id: Uuid) -> StoreResult<RestaurantView> {
        let row = self.table.get(restaurant_id)?;
        check_invariants(std::iter::once(&row))?;
        let mut view = row.to_view();
        ListingOrderer::order_products(&mut view.products);
        Ok(view)
    }
}
