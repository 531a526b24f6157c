//! Store error taxonomy
//!
//! Error codes:
//! - DISH_NOT_FOUND (ERROR severity)
//! - DISH_FORBIDDEN (ERROR severity)
//! - DISH_PERSISTENCE_FAILED (ERROR severity)
//! - DISH_DATA_CORRUPTION (FATAL severity)
//! - DISH_INVARIANT_VIOLATION (FATAL severity)
//!
//! FATAL means the table cannot be trusted: corruption and invariant
//! violations are reported, never auto-corrected.

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Referenced restaurant does not exist
    #[error("Restaurant not found: {0}")]
    NotFound(Uuid),

    /// Actor does not own the restaurant they are mutating
    #[error("Actor {actor} does not own restaurant {restaurant}")]
    Forbidden { actor: Uuid, restaurant: Uuid },

    /// Journal write or commit failed; no partial state was retained
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Checksum or framing failure while replaying the journal
    #[error("FATAL: Journal corruption: {0}")]
    Corruption(String),

    /// I1 or I2 found broken on read; unrecoverable data fault
    #[error("FATAL: Invariant violation: {0}")]
    InvariantViolation(String),
}

impl StoreError {
    /// Stable error code for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "DISH_NOT_FOUND",
            Self::Forbidden { .. } => "DISH_FORBIDDEN",
            Self::Persistence(_) => "DISH_PERSISTENCE_FAILED",
            Self::Corruption(_) => "DISH_DATA_CORRUPTION",
            Self::InvariantViolation(_) => "DISH_INVARIANT_VIOLATION",
        }
    }

    /// Whether the table must be considered unusable after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corruption(_) | Self::InvariantViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let id = Uuid::new_v4();
        assert_eq!(StoreError::NotFound(id).code(), "DISH_NOT_FOUND");
        assert_eq!(
            StoreError::Forbidden {
                actor: id,
                restaurant: id
            }
            .code(),
            "DISH_FORBIDDEN"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(StoreError::Corruption("truncated record".into()).is_fatal());
        assert!(StoreError::InvariantViolation("two promoted".into()).is_fatal());
        assert!(!StoreError::NotFound(Uuid::new_v4()).is_fatal());
        assert!(!StoreError::Persistence("disk full".into()).is_fatal());
    }
}
