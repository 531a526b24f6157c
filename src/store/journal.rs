//! Append-only restaurant journal
//!
//! Every committed row is appended as a full JSON snapshot framed as
//! `[payload_len: u32 LE][crc32: u32 LE][payload]`. The latest record
//! per restaurant id wins on replay; there are no in-place updates.
//!
//! Every replayed record is checksum-validated. Any framing or checksum
//! failure is corruption and aborts the load — a half-written tail
//! cannot silently drop or mangle a committed row.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;

use super::errors::{StoreError, StoreResult};
use super::fault;
use crate::model::Restaurant;
use crate::observability::log_error;

/// File name of the journal inside the data directory
const JOURNAL_FILE: &str = "restaurants.dat";

/// Computes the CRC32 (IEEE) checksum of a payload.
fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Append-only journal of restaurant row snapshots.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    file: File,
    /// Set when a failed append could not be truncated away. A
    /// poisoned journal refuses further appends: writing behind a
    /// damaged region would strand every later commit at replay.
    poisoned: bool,
}

impl Journal {
    /// Opens or creates the journal under `data_dir`.
    ///
    /// Creates the data directory if it does not exist.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                StoreError::Persistence(format!(
                    "Failed to create data directory {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
        }

        let path = data_dir.join(JOURNAL_FILE);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::Persistence(format!(
                    "Failed to open journal {}: {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self {
            path,
            file,
            poisoned: false,
        })
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a batch of row snapshots as one buffered write, then fsyncs.
    ///
    /// Either the whole batch becomes durable or the journal is
    /// restored to its pre-append length: a failed append must not
    /// leave a torn record (which would strand every later commit at
    /// replay) or a complete-but-unacknowledged one (which would win
    /// latest-wins and resurrect a change the caller was told failed).
    /// The in-memory table is only updated after this returns `Ok`.
    pub fn append(&mut self, rows: &[Restaurant]) -> StoreResult<()> {
        if self.poisoned {
            return Err(StoreError::Persistence(
                "journal refuses writes after an unrecoverable append failure".to_string(),
            ));
        }

        let mut buf = Vec::with_capacity(rows.len() * 256);
        for row in rows {
            let payload = serde_json::to_vec(row).map_err(|e| {
                StoreError::Persistence(format!("Failed to encode row {}: {}", row.id, e))
            })?;
            let len = u32::try_from(payload.len()).map_err(|_| {
                StoreError::Persistence(format!(
                    "Row {} exceeds the maximum record size",
                    row.id
                ))
            })?;
            let checksum = compute_checksum(&payload);
            buf.extend_from_slice(&len.to_le_bytes());
            buf.extend_from_slice(&checksum.to_le_bytes());
            buf.extend_from_slice(&payload);
        }

        let start_len = self
            .file
            .metadata()
            .map_err(|e| StoreError::Persistence(format!("Journal metadata failed: {}", e)))?
            .len();

        if let Err(e) = self.write_and_sync(&buf) {
            self.rewind(start_len);
            return Err(e);
        }
        Ok(())
    }

    fn write_and_sync(&mut self, buf: &[u8]) -> StoreResult<()> {
        if fault::fault_enabled(fault::points::JOURNAL_BEFORE_WRITE) {
            return Err(StoreError::Persistence(
                "injected fault: journal_before_write".to_string(),
            ));
        }
        self.file
            .write_all(buf)
            .map_err(|e| StoreError::Persistence(format!("Journal write failed: {}", e)))?;
        if fault::fault_enabled(fault::points::JOURNAL_AFTER_WRITE) {
            return Err(StoreError::Persistence(
                "injected fault: journal_after_write".to_string(),
            ));
        }
        self.file
            .sync_all()
            .map_err(|e| StoreError::Persistence(format!("Journal fsync failed: {}", e)))?;
        Ok(())
    }

    /// Truncates back to the pre-append length after a failed append.
    ///
    /// If the truncation itself cannot be completed the journal is
    /// poisoned and refuses every further append.
    fn rewind(&mut self, len: u64) {
        let restored = self.file.set_len(len).is_ok() && self.file.sync_all().is_ok();
        if !restored {
            self.poisoned = true;
            log_error(
                "journal.rewind_failed",
                &[("path", &self.path.display().to_string())],
            );
        }
    }

    /// Replays every record in append order.
    ///
    /// The caller applies latest-wins per restaurant id.
    pub fn replay(&mut self) -> StoreResult<Vec<Restaurant>> {
        let mut file = File::open(&self.path).map_err(|e| {
            StoreError::Persistence(format!(
                "Failed to open journal {} for replay: {}",
                self.path.display(),
                e
            ))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| StoreError::Persistence(format!("Journal read failed: {}", e)))?;

        let mut rows = Vec::new();
        let mut offset = 0usize;
        while offset < bytes.len() {
            if bytes.len() - offset < 8 {
                return Err(StoreError::Corruption(format!(
                    "Truncated record header at offset {}",
                    offset
                )));
            }
            let len = u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap()) as usize;
            let expected =
                u32::from_le_bytes(bytes[offset + 4..offset + 8].try_into().unwrap());
            offset += 8;

            if bytes.len() - offset < len {
                return Err(StoreError::Corruption(format!(
                    "Truncated record payload at offset {} (want {} bytes, have {})",
                    offset,
                    len,
                    bytes.len() - offset
                )));
            }
            let payload = &bytes[offset..offset + len];
            offset += len;

            if compute_checksum(payload) != expected {
                return Err(StoreError::Corruption(format!(
                    "Checksum mismatch at offset {}",
                    offset - len
                )));
            }

            let row: Restaurant = serde_json::from_slice(payload).map_err(|e| {
                StoreError::Corruption(format!(
                    "Undecodable record at offset {}: {}",
                    offset - len,
                    e
                ))
            })?;
            rows.push(row);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RestaurantCategory;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_row(name: &str) -> Restaurant {
        let now = Utc::now();
        Restaurant {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            address: "somewhere".to_string(),
            shipping_costs: 1.0,
            pinned: false,
            pinned_at: None,
            promoted: false,
            category: RestaurantCategory {
                id: Uuid::new_v4(),
                name: "Pizza".to_string(),
            },
            products: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_append_then_replay() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = Journal::open(dir.path()).unwrap();

        let a = sample_row("a");
        let b = sample_row("b");
        journal.append(&[a.clone()]).unwrap();
        journal.append(&[b.clone()]).unwrap();

        let rows = journal.replay().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, a.id);
        assert_eq!(rows[1].id, b.id);
    }

    #[test]
    fn test_replay_detects_flipped_byte() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = Journal::open(dir.path()).unwrap();
        journal.append(&[sample_row("a")]).unwrap();

        let path = journal.path().to_path_buf();
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        fs::write(&path, bytes).unwrap();

        let mut journal = Journal::open(dir.path()).unwrap();
        let err = journal.replay().unwrap_err();
        assert!(matches!(err, StoreError::Corruption(_)));
    }

    #[test]
    fn test_replay_detects_truncated_tail() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = Journal::open(dir.path()).unwrap();
        journal.append(&[sample_row("a")]).unwrap();

        let path = journal.path().to_path_buf();
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();

        let mut journal = Journal::open(dir.path()).unwrap();
        let err = journal.replay().unwrap_err();
        assert!(matches!(err, StoreError::Corruption(_)));
    }

    #[test]
    fn test_empty_journal_replays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = Journal::open(dir.path()).unwrap();
        assert!(journal.replay().unwrap().is_empty());
    }
}
