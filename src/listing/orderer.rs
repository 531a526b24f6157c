//! Listing order computation
//!
//! Pure, stable sorts over already-materialized collections. Sorting
//! never touches the store and is safe on empty or partially-loaded
//! input.

use std::cmp::Ordering;

use crate::model::{Product, Restaurant};

/// Orders restaurant collections for the read path.
pub struct ListingOrderer;

impl ListingOrderer {
    /// Public listing order: pinned first, then earlier-pinned first,
    /// then category name.
    ///
    /// Unpinned rows all carry `pinned_at == None`, so the timestamp
    /// key never orders them against each other; they fall through to
    /// the category key.
    pub fn order_public(restaurants: &mut [Restaurant]) {
        restaurants.sort_by(|a, b| {
            Self::compare_pin(a, b).then_with(|| a.category.name.cmp(&b.category.name))
        });
    }

    /// Owner listing order: pinned first, then earlier-pinned first.
    /// No category key.
    pub fn order_owner(restaurants: &mut [Restaurant]) {
        restaurants.sort_by(Self::compare_pin);
    }

    /// Product order for the single-restaurant view: explicit `order`
    /// ascending, ties keeping insertion order (the sort is stable).
    pub fn order_products(products: &mut [Product]) {
        products.sort_by(|a, b| a.order.cmp(&b.order));
    }

    /// `pinned` descending, then `pinned_at` ascending.
    fn compare_pin(a: &Restaurant, b: &Restaurant) -> Ordering {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| a.pinned_at.cmp(&b.pinned_at))
    }
}
