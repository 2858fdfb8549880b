//! The generic, concurrency-safe, file-backed record store.
//!
//! A [`Store`] mirrors an ordered collection of records to exactly one JSON
//! file. The file is the single source of truth: it is decoded once at
//! construction and fully rewritten on every mutation. There is no partial
//! or incremental persistence, and no cross-process locking; two processes
//! pointed at the same file will corrupt each other's writes.
//!
//! One `RwLock` per store guards the collection. Writers hold it for the
//! duration of the rewrite, so a reader never observes a collection
//! mid-mutation. Reads hand out owned clones; changing a record is always
//! an explicit [`Store::update`].

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PatterError, Result};

// ---------------------------------------------------------------------------
// Record contract
// ---------------------------------------------------------------------------

/// A storable record with an identifier field.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// The record's identifier; nil when not yet assigned.
    fn id(&self) -> Uuid;

    /// Return the record with `id` as its identifier.
    #[must_use]
    fn with_id(self, id: Uuid) -> Self;

    /// Return the record with fresh identifiers assigned to itself and to
    /// every nested sub-entity whose identifier is still nil. Already-set
    /// identifiers are preserved; the assignment is idempotent per field.
    #[must_use]
    fn with_assigned_ids(self) -> Self;
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// An ordered collection of records mirrored to a single JSON file.
#[derive(Debug)]
pub struct Store<R> {
    path: PathBuf,
    records: RwLock<Vec<R>>,
}

impl<R: Record> Store<R> {
    /// Open the store at `path`, creating an empty file if none exists.
    ///
    /// An empty file decodes to an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::Io`] when the file cannot be created or read,
    /// or [`PatterError::Serialization`] when its contents are malformed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, b"")?;
        }

        let raw = fs::read_to_string(&path)?;
        let records: Vec<R> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw).map_err(|err| {
                PatterError::Serialization(format!(
                    "can't decode records from {}: {err}",
                    path.display()
                ))
            })?
        };

        info!(path = %path.display(), records = records.len(), "store opened");
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Look up a record by its string identifier and return an owned copy.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::InvalidIdentifier`] when `id` does not parse,
    /// or [`PatterError::NotFound`] when no record matches.
    pub fn get(&self, id: &str) -> Result<R> {
        let uid = Uuid::parse_str(id)?;
        self.get_by_id(uid)
    }

    /// Look up a record by identifier and return an owned copy.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::NotFound`] when no record matches.
    pub fn get_by_id(&self, id: Uuid) -> Result<R> {
        self.records
            .read()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(PatterError::NotFound(id))
    }

    /// A snapshot of the whole collection, in storage order.
    #[must_use]
    pub fn all(&self) -> Vec<R> {
        self.records.read().clone()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Append a new record with a server-assigned identifier and persist.
    ///
    /// Returns the stored record so the caller learns the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::IdentifierNotAllowed`] when the caller already
    /// set an identifier, or a persistence error when the rewrite fails.
    pub fn create(&self, record: R) -> Result<R> {
        if !record.id().is_nil() {
            return Err(PatterError::IdentifierNotAllowed);
        }
        let record = record.with_id(Uuid::new_v4());

        let mut records = self.records.write();
        records.push(record.clone());
        self.dump(&records)?;
        debug!(id = %record.id(), total = records.len(), "record created");
        Ok(record)
    }

    /// Replace the stored record whose identifier matches, assigning fresh
    /// identifiers to any nested sub-entity that lacks one, and persist.
    ///
    /// A record whose identifier matches nothing leaves the collection
    /// unchanged; the call still persists and succeeds.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the rewrite fails.
    pub fn update(&self, record: R) -> Result<R> {
        let record = record.with_assigned_ids();

        let mut records = self.records.write();
        for stored in records.iter_mut() {
            if stored.id() == record.id() {
                *stored = record.clone();
            }
        }
        self.dump(&records)?;
        debug!(id = %record.id(), "record updated");
        Ok(record)
    }

    /// Remove the record with the given string identifier and persist.
    ///
    /// # Errors
    ///
    /// Returns the same identifier errors as [`Store::get`], or a
    /// persistence error when the rewrite fails.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.delete_with(id, |_| Ok(()))
    }

    /// Remove a record, running `before_remove` on it first while the write
    /// lock is held. If the closure fails, the whole operation aborts and
    /// the collection is left unchanged.
    ///
    /// The media library hooks its backing-file removal in here so the
    /// catalogue can never diverge from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns the same identifier errors as [`Store::get`], the error from
    /// `before_remove`, or a persistence error when the rewrite fails.
    pub fn delete_with(&self, id: &str, before_remove: impl FnOnce(&R) -> Result<()>) -> Result<()> {
        let uid = Uuid::parse_str(id)?;

        let mut records = self.records.write();
        let position = records
            .iter()
            .position(|r| r.id() == uid)
            .ok_or(PatterError::NotFound(uid))?;

        before_remove(&records[position])?;
        records.remove(position);
        self.dump(&records)?;
        debug!(id = %uid, total = records.len(), "record deleted");
        Ok(())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Swap in a new in-memory collection without persisting.
    ///
    /// Used by library assembly to install the load-time view (assigned
    /// identifiers, resolved asset paths) over the authored file contents.
    pub(crate) fn install(&self, records: Vec<R>) {
        *self.records.write() = records;
    }

    /// Rewrite the entire backing file from the given collection. Callers
    /// hold the write lock, so concurrent mutations serialize here.
    fn dump(&self, records: &[R]) -> Result<()> {
        let json = serde_json::to_vec(records)
            .map_err(|err| PatterError::Serialization(err.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
