//! # REST API Module
//!
//! HTTP surface over the core pin/promotion/listing operations.

pub mod errors;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{router, AppState};
