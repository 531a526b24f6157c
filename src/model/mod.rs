//! # Restaurant Entities
//!
//! Entity types for the restaurant table and the redacted views
//! returned by the read path.
//!
//! The owner identifier never appears in `RestaurantView`: public reads
//! cannot leak it because the view type has no field for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category a restaurant belongs to. Read-only for this system;
/// its name participates in the public listing order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantCategory {
    pub id: Uuid,
    pub name: String,
}

/// A product on a restaurant's menu. Read-only for this system;
/// `order` is the explicit position used by the single-restaurant view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    /// Explicit menu position. Ties keep insertion order.
    pub order: i32,
}

/// Restaurant row as stored.
///
/// Invariants maintained by the store:
/// - `pinned_at` is `Some` iff `pinned` is true
/// - at most one row per `owner_id` has `promoted == true`
/// - `owner_id` never changes after creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    /// Unique restaurant identifier
    pub id: Uuid,

    /// Owning actor's identifier
    pub owner_id: Uuid,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub address: String,

    pub shipping_costs: f64,

    /// Sorted ahead of unpinned rows in listings
    pub pinned: bool,

    /// When the pin was applied; tie-break sort key among pinned rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<DateTime<Utc>>,

    /// The owner's single featured listing flag
    pub promoted: bool,

    pub category: RestaurantCategory,

    pub products: Vec<Product>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// Build the redacted view handed to callers.
    pub fn to_view(&self) -> RestaurantView {
        RestaurantView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            shipping_costs: self.shipping_costs,
            pinned: self.pinned,
            pinned_at: self.pinned_at,
            promoted: self.promoted,
            category: self.category.clone(),
            products: self.products.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Enumerated creation input. Only the fields creation is allowed to
/// set; there is no open attribute bag anywhere in the write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub shipping_costs: f64,
    /// A listing may be born pinned; `pinned_at` is derived, never supplied.
    #[serde(default)]
    pub pinned: bool,
    pub category: RestaurantCategory,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Restaurant as returned from every read operation.
///
/// Identical to [`Restaurant`] minus `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantView {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub shipping_costs: f64,
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<DateTime<Utc>>,
    pub promoted: bool,
    pub category: RestaurantCategory,
    pub products: Vec<Product>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
