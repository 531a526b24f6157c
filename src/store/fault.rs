//! Fault point injection for durability testing
//!
//! The `DISHBOARD_FAULT_POINT` environment variable names a single
//! fault point. When the journal reaches an enabled point, the append
//! fails with `Persistence` exactly as the real I/O failure would,
//! without touching the file any further. No process abort, no
//! unwinding tricks: the point of these faults is to exercise the
//! rollback path, not crash recovery.
//!
//! The variable is read on every check so tests can enable and disable
//! points at runtime within one process.

/// Check if a specific fault point is enabled.
///
/// Returns true if `DISHBOARD_FAULT_POINT` equals the given name.
#[inline]
pub fn fault_enabled(name: &str) -> bool {
    std::env::var("DISHBOARD_FAULT_POINT")
        .map(|p| p == name)
        .unwrap_or(false)
}

/// All defined fault point names
pub mod points {
    /// Fail before any byte of the batch reaches the file
    pub const JOURNAL_BEFORE_WRITE: &str = "journal_before_write";
    /// Fail after the batch is written but before the fsync, the shape
    /// of an fsync failure with bytes already in the OS cache
    pub const JOURNAL_AFTER_WRITE: &str = "journal_after_write";

    /// Get all fault point names
    pub fn all() -> &'static [&'static str] {
        &[JOURNAL_BEFORE_WRITE, JOURNAL_AFTER_WRITE]
    }
}
