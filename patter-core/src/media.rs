//! The media library: uploaded images shown alongside a session.
//!
//! A flat catalogue of [`MediaItem`]s held in a [`Store`]. The library owns
//! the uploaded files: deleting an item also deletes its backing file, and a
//! failed file removal aborts the whole deletion so the catalogue never
//! diverges from the filesystem.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::store::{Record, Store};
use crate::types::MediaId;

/// One uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaItem {
    /// Identifier; nil until assigned by the store.
    #[serde(rename = "ID", default)]
    pub id: MediaId,
    /// Display name shown in the authoring UI.
    pub name: String,
    /// Group label used to organize the gallery.
    #[serde(default)]
    pub group: String,
    /// Where the uploaded file is stored on disk.
    pub file_path: PathBuf,
}

impl Record for MediaItem {
    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn with_id(mut self, id: Uuid) -> Self {
        self.id = MediaId::from(id);
        self
    }

    fn with_assigned_ids(mut self) -> Self {
        if self.id.is_nil() {
            self.id = MediaId::new();
        }
        self
    }
}

/// The media library.
#[derive(Debug)]
pub struct MediaLibrary {
    store: Store<MediaItem>,
}

impl MediaLibrary {
    /// Open the backing store at `path`, creating it empty if absent.
    ///
    /// # Errors
    ///
    /// Propagates store construction failures.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: Store::open(path)?,
        })
    }

    /// Look up a media item by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatterError::InvalidIdentifier`] or
    /// [`crate::PatterError::NotFound`].
    pub fn get(&self, id: &str) -> Result<MediaItem> {
        self.store.get(id)
    }

    /// Add a new media item with a server-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatterError::IdentifierNotAllowed`] when the caller
    /// set an identifier, or a persistence error.
    pub fn create(&self, item: MediaItem) -> Result<MediaItem> {
        self.store.create(item)
    }

    /// Replace a stored media item.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the rewrite fails.
    pub fn update(&self, item: MediaItem) -> Result<MediaItem> {
        self.store.update(item)
    }

    /// Remove a media item together with its backing file.
    ///
    /// The file is removed first; if that fails, the catalogue entry stays
    /// and the error propagates. A record removed from the catalogue never
    /// leaves an orphaned file behind.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatterError::InvalidIdentifier`],
    /// [`crate::PatterError::NotFound`], [`crate::PatterError::Io`] from the
    /// file removal, or a persistence error.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_with(id, |item| {
            fs::remove_file(&item.file_path)?;
            debug!(path = %item.file_path.display(), "backing file removed");
            Ok(())
        })
    }

    /// A snapshot of all media items in catalogue order.
    #[must_use]
    pub fn items(&self) -> Vec<MediaItem> {
        self.store.all()
    }

    /// All distinct group labels, sorted.
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self
            .store
            .all()
            .into_iter()
            .map(|item| item.group)
            .collect();
        groups.sort();
        groups.dedup();
        groups
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
