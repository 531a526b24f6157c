//! # Listing
//!
//! Read-side ordering and the redacted read operations.

pub mod orderer;
pub mod reader;

pub use orderer::ListingOrderer;
pub use reader::ListingReader;
