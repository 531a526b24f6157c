//! dishboard - restaurant listing backend with pinning, per-owner
//! promotion, and deterministic listing order

pub mod cli;
pub mod listing;
pub mod model;
pub mod observability;
pub mod pin;
pub mod promotion;
pub mod rest_api;
pub mod store;
