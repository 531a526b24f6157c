//! Restaurant table with scoped write transactions
//!
//! All mutations go through a [`WriteTransaction`]: rows are staged as
//! copies, invariants are validated over the staged outcome, the staged
//! rows are appended to the journal, and only then does memory change.
//! Dropping a transaction without committing discards every staged row,
//! so rollback happens on every exit path.
//!
//! The transaction holds the table's write lock for its whole lifetime.
//! That serializes all writers, which is the locking guarantee the
//! promotion path needs: two promotes for the same owner can never
//! interleave their read of "who is promoted" with each other's writes.
//! Readers only ever see committed state.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{RwLock, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::journal::Journal;
use crate::model::{NewRestaurant, Restaurant};

#[derive(Debug)]
struct TableInner {
    rows: HashMap<Uuid, Restaurant>,
    journal: Journal,
}

/// The restaurant table.
///
/// Cheap to share via `Arc`; request handlers for different restaurants
/// run in parallel and synchronize only here.
#[derive(Debug)]
pub struct RestaurantTable {
    inner: RwLock<TableInner>,
}

impl RestaurantTable {
    /// Opens the table, replaying the journal under `data_dir`.
    ///
    /// Latest record per id wins. After replay the whole table is
    /// verified against I1 and I2; a violation means the journal was
    /// produced by a broken writer and the table refuses to load.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let mut journal = Journal::open(data_dir)?;
        let mut rows: HashMap<Uuid, Restaurant> = HashMap::new();
        for row in journal.replay()? {
            rows.insert(row.id, row);
        }

        let all: Vec<&Restaurant> = rows.values().collect();
        check_invariants(all.into_iter())?;

        Ok(Self {
            inner: RwLock::new(TableInner { rows, journal }),
        })
    }

    /// Begins a write transaction, blocking until the write lock is held.
    pub fn begin_write(&self) -> StoreResult<WriteTransaction<'_>> {
        let guard = self
            .inner
            .write()
            .map_err(|_| StoreError::Persistence("table lock poisoned".to_string()))?;
        Ok(WriteTransaction {
            guard,
            staged: Vec::new(),
        })
    }

    /// Creates a restaurant from the enumerated creation input.
    ///
    /// Establishes I1 at birth: `pinned_at` is derived from `pinned`,
    /// never supplied by the caller.
    pub fn create(&self, owner_id: Uuid, new: NewRestaurant) -> StoreResult<Restaurant> {
        let now = Utc::now();
        let row = Restaurant {
            id: Uuid::new_v4(),
            owner_id,
            name: new.name,
            description: new.description,
            address: new.address,
            shipping_costs: new.shipping_costs,
            pinned: new.pinned,
            pinned_at: if new.pinned { Some(now) } else { None },
            promoted: false,
            category: new.category,
            products: new.products,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.begin_write()?;
        let created = tx.stage(row).clone();
        tx.commit()?;
        Ok(created)
    }

    /// Fetches one row by id.
    pub fn get(&self, id: Uuid) -> StoreResult<Restaurant> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Persistence("table lock poisoned".to_string()))?;
        inner.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Snapshot of every committed row, in no particular order.
    pub fn snapshot(&self) -> StoreResult<Vec<Restaurant>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Persistence("table lock poisoned".to_string()))?;
        Ok(inner.rows.values().cloned().collect())
    }

    /// Number of committed rows.
    pub fn len(&self) -> StoreResult<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Persistence("table lock poisoned".to_string()))?;
        Ok(inner.rows.len())
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Scoped write transaction over the restaurant table.
///
/// Obtained from [`RestaurantTable::begin_write`]. Commit applies all
/// staged rows atomically; drop without commit rolls back.
pub struct WriteTransaction<'a> {
    guard: RwLockWriteGuard<'a, TableInner>,
    /// Staged rows in stage order; a later stage of the same id
    /// replaces the earlier one.
    staged: Vec<Restaurant>,
}

impl<'a> WriteTransaction<'a> {
    /// Fetches a row as this transaction sees it (staged first).
    pub fn get(&self, id: Uuid) -> Option<&Restaurant> {
        self.staged
            .iter()
            .rev()
            .find(|r| r.id == id)
            .or_else(|| self.guard.rows.get(&id))
    }

    /// Finds the promoted row for `owner_id`, staged view included.
    ///
    /// At most one exists when entering the transaction (I2).
    pub fn promoted_for_owner(&self, owner_id: Uuid) -> Option<&Restaurant> {
        if let Some(staged) = self
            .staged
            .iter()
            .rev()
            .find(|r| r.owner_id == owner_id && r.promoted)
        {
            return Some(staged);
        }
        self.guard
            .rows
            .values()
            .find(|r| r.owner_id == owner_id && r.promoted && !self.is_staged(r.id))
    }

    fn is_staged(&self, id: Uuid) -> bool {
        self.staged.iter().any(|r| r.id == id)
    }

    /// Stages a row snapshot to be applied at commit.
    ///
    /// Returns the staged row, which carries the final `updated_at`.
    pub fn stage(&mut self, mut row: Restaurant) -> &Restaurant {
        if let Some(existing) = self.guard.rows.get(&row.id) {
            // updated_at only moves when an existing row actually changes
            row.created_at = existing.created_at;
        }
        row.updated_at = Utc::now();
        self.staged.retain(|r| r.id != row.id);
        self.staged.push(row);
        match self.staged.last() {
            Some(staged) => staged,
            None => unreachable!("row was just pushed"),
        }
    }

    /// Validates, journals, and applies every staged row.
    ///
    /// Order matters: nothing reaches memory until the journal append
    /// has been fsynced, and nothing reaches the journal until the
    /// staged outcome satisfies I1, I2, and I3.
    pub fn commit(mut self) -> StoreResult<()> {
        if self.staged.is_empty() {
            return Ok(());
        }

        self.validate_staged()?;

        let staged = std::mem::take(&mut self.staged);
        self.guard.journal.append(&staged)?;
        for row in staged {
            self.guard.rows.insert(row.id, row);
        }
        Ok(())
    }

    fn validate_staged(&self) -> StoreResult<()> {
        // I3: owner_id of an existing row never changes
        for row in &self.staged {
            if let Some(existing) = self.guard.rows.get(&row.id) {
                if existing.owner_id != row.owner_id {
                    return Err(StoreError::InvariantViolation(format!(
                        "owner_id of restaurant {} would change",
                        row.id
                    )));
                }
            }
        }

        let staged_ids: HashSet<Uuid> = self.staged.iter().map(|r| r.id).collect();
        let outcome = self
            .staged
            .iter()
            .chain(self.guard.rows.values().filter(|r| !staged_ids.contains(&r.id)));
        check_invariants(outcome)
    }
}

/// Verifies I1 and I2 over a set of rows.
///
/// Used at load time and at every commit; a failure here is a data
/// fault to report, never to auto-correct.
pub fn check_invariants<'r>(rows: impl Iterator<Item = &'r Restaurant>) -> StoreResult<()> {
    let mut promoted_owners: HashSet<Uuid> = HashSet::new();
    for row in rows {
        if row.pinned != row.pinned_at.is_some() {
            return Err(StoreError::InvariantViolation(format!(
                "restaurant {}: pinned={} but pinned_at={:?}",
                row.id, row.pinned, row.pinned_at
            )));
        }
        if row.promoted && !promoted_owners.insert(row.owner_id) {
            return Err(StoreError::InvariantViolation(format!(
                "owner {} has more than one promoted restaurant",
                row.owner_id
            )));
        }
    }
    Ok(())
}
