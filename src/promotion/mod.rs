//! # Promotion Manager
//!
//! Maintains the owner-scoped exclusivity invariant: at most one of an
//! owner's restaurants is promoted at any committed instant.
//!
//! Promoting B while A holds the slot demotes A and promotes B in one
//! commit. The write transaction holds the table lock from the first
//! read to the commit, so two promotes for the same owner cannot both
//! read "A is promoted" and then both write; the second sees the
//! first's outcome. Commit-time validation rejects any outcome with two
//! promoted rows for one owner as defense in depth.

use std::sync::Arc;

use uuid::Uuid;

use crate::model::Restaurant;
use crate::observability::{log_error, log_info};
use crate::store::{RestaurantTable, StoreError, StoreResult};

/// Applies the demote-then-promote switch for an owner's featured slot.
pub struct PromotionManager {
    table: Arc<RestaurantTable>,
}

impl PromotionManager {
    pub fn new(table: Arc<RestaurantTable>) -> Self {
        Self { table }
    }

    /// Promotes `restaurant_id` as `actor_id`'s featured listing.
    ///
    /// Preconditions, in order: the restaurant exists (`NotFound`), the
    /// actor owns it (`Forbidden`). Re-promoting the current holder is
    /// a successful no-op: nothing is journaled and the row comes back
    /// unchanged.
    pub fn promote(&self, actor_id: Uuid, restaurant_id: Uuid) -> StoreResult<Restaurant> {
        let mut tx = self.table.begin_write()?;

        let target = tx
            .get(restaurant_id)
            .cloned()
            .ok_or(StoreError::NotFound(restaurant_id))?;
        if target.owner_id != actor_id {
            return Err(StoreError::Forbidden {
                actor: actor_id,
                restaurant: restaurant_id,
            });
        }

        if target.promoted {
            log_info(
                "promotion.noop",
                &[("restaurant_id", &restaurant_id.to_string())],
            );
            return Ok(target);
        }

        let previous = tx.promoted_for_owner(actor_id).cloned();
        if let Some(mut demoted) = previous {
            demoted.promoted = false;
            tx.stage(demoted);
        }

        let mut promoted = target;
        promoted.promoted = true;
        let result = tx.stage(promoted).clone();

        if let Err(e) = tx.commit() {
            log_error(
                "promotion.commit_failed",
                &[
                    ("code", e.code()),
                    ("restaurant_id", &restaurant_id.to_string()),
                ],
            );
            return Err(e);
        }

        log_info(
            "promotion.applied",
            &[
                ("owner_id", &actor_id.to_string()),
                ("restaurant_id", &restaurant_id.to_string()),
            ],
        );
        Ok(result)
    }
}
