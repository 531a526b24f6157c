//! # Restaurant Store
//!
//! Journal-backed restaurant table with scoped write transactions.
//!
//! - `errors` - failure taxonomy (`StoreError`)
//! - `fault` - env-driven fault points for durability tests
//! - `journal` - append-only checksummed row journal
//! - `table` - in-memory table, `WriteTransaction`, invariant checks

pub mod errors;
pub mod fault;
pub mod journal;
pub mod table;

pub use errors::{StoreError, StoreResult};
pub use journal::Journal;
pub use table::{check_invariants, RestaurantTable, WriteTransaction};
