//! Authored dialogue sessions and the session library.
//!
//! A [`Session`] is a named, ordered script of [`SessionItem`]s; each item
//! bundles composite actions where the first is conventionally the prompt
//! and the rest are candidate follow-ups the operator can pick from.
//!
//! The [`SessionLibrary`] holds sessions in a [`Store`] and assembles the
//! collection at load time: missing identifiers are filled in, say-action
//! audio paths are resolved under the audio root (one subdirectory per
//! session, keyed by session name), and authored move placeholders are
//! overlaid with entries from the move catalogue. Assembly is
//! all-or-nothing: a missing audio asset fails the whole load rather than
//! producing a partially valid library.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::action::SayAndMoveAction;
use crate::catalogue::MoveCatalogue;
use crate::error::{PatterError, Result};
use crate::store::{Record, Store};
use crate::types::{ActionId, ItemId, SessionId};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A scripted conversation: questions and supportive answers, each paired
/// with a motion so the exchange stays lively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Session {
    /// Identifier; nil until assigned by the library or store.
    #[serde(rename = "ID", default)]
    pub id: SessionId,
    /// Session name, also the audio subdirectory for its recordings.
    pub name: String,
    /// Free-form description shown in the authoring UI.
    #[serde(default)]
    pub description: String,
    /// The script, in presentation order.
    #[serde(default)]
    pub items: Vec<SessionItem>,
}

/// One unit of a session: a prompt action followed by candidate follow-ups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionItem {
    /// Identifier; nil until assigned by the library or store.
    #[serde(rename = "ID", default)]
    pub id: ItemId,
    /// The composite actions; the first is the prompt.
    #[serde(default)]
    pub actions: Vec<SayAndMoveAction>,
}

impl SessionItem {
    /// Return the item with fresh identifiers assigned to itself and every
    /// nested action still carrying the nil identifier.
    #[must_use]
    pub fn with_assigned_ids(mut self) -> Self {
        if self.id.is_nil() {
            self.id = ItemId::new();
        }
        self.actions = self
            .actions
            .into_iter()
            .map(SayAndMoveAction::with_assigned_ids)
            .collect();
        self
    }
}

impl Record for Session {
    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn with_id(mut self, id: Uuid) -> Self {
        self.id = SessionId::from(id);
        self
    }

    fn with_assigned_ids(mut self) -> Self {
        if self.id.is_nil() {
            self.id = SessionId::new();
        }
        self.items = self
            .items
            .into_iter()
            .map(SessionItem::with_assigned_ids)
            .collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble one session for use: assign missing identifiers, resolve audio
/// assets, and overlay catalogue moves onto authored placeholders.
///
/// Audio paths are resolved by joining the session's name as a subdirectory
/// under `audio_root`; already-absolute paths are checked as-is, which keeps
/// the function idempotent over its own output. A move name with a catalogue
/// match is substituted with a private copy of the catalogue entry carrying
/// the authored delay; the catalogue itself is never mutated. A move name
/// with no match is left as authored, to be resolved by the robot.
///
/// # Errors
///
/// Returns [`PatterError::MissingAsset`] when a referenced audio file does
/// not exist on disk.
pub fn assemble_session(
    session: Session,
    audio_root: &Path,
    catalogue: &MoveCatalogue,
) -> Result<Session> {
    let mut session = session.with_assigned_ids();
    let audio_dir = audio_root.join(&session.name);

    for item in &mut session.items {
        for action in &mut item.actions {
            if let Some(authored) = action
                .say_item
                .file_path
                .as_ref()
                .filter(|p| !p.as_os_str().is_empty())
            {
                let resolved: PathBuf = if authored.is_absolute() {
                    authored.clone()
                } else {
                    audio_dir.join(authored)
                };
                if !resolved.exists() {
                    return Err(PatterError::MissingAsset(resolved));
                }
                action.say_item.file_path = Some(resolved);
            }

            if let Some(library) = catalogue.get(&action.move_item.name) {
                let mut substituted = library.clone();
                substituted.delay = action.move_item.delay;
                action.move_item = substituted;
            }
        }
    }

    Ok(session)
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// The session library: a record store of sessions, assembled at load time.
#[derive(Debug)]
pub struct SessionLibrary {
    store: Store<Session>,
}

impl SessionLibrary {
    /// Open the backing store at `path` and assemble every session against
    /// `audio_root` and the move `catalogue`.
    ///
    /// The assembled view (assigned identifiers, resolved paths, overlaid
    /// moves) is what the library serves; the backing file keeps whatever
    /// was authored until the next mutation rewrites it.
    ///
    /// # Errors
    ///
    /// Propagates store construction failures, and fails with
    /// [`PatterError::MissingAsset`] when any session references an audio
    /// file that is absent. No library is produced in that case.
    pub fn open(
        path: impl Into<PathBuf>,
        audio_root: &Path,
        catalogue: &MoveCatalogue,
    ) -> Result<Self> {
        let store = Store::open(path)?;
        let assembled = store
            .all()
            .into_iter()
            .map(|session| assemble_session(session, audio_root, catalogue))
            .collect::<Result<Vec<_>>>()?;

        info!(sessions = assembled.len(), "session library assembled");
        store.install(assembled);
        Ok(Self { store })
    }

    /// Look up a session by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::InvalidIdentifier`] or
    /// [`PatterError::NotFound`].
    pub fn get(&self, id: &str) -> Result<Session> {
        self.store.get(id)
    }

    /// Add a new session with a server-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::IdentifierNotAllowed`] when the caller set an
    /// identifier, or a persistence error.
    pub fn create(&self, session: Session) -> Result<Session> {
        self.store.create(session)
    }

    /// Replace a stored session, assigning identifiers to any nested item
    /// or action that lacks one.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the rewrite fails.
    pub fn update(&self, session: Session) -> Result<Session> {
        self.store.update(session)
    }

    /// Remove a session by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::InvalidIdentifier`], [`PatterError::NotFound`],
    /// or a persistence error.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id)
    }

    /// A snapshot of all sessions in library order.
    #[must_use]
    pub fn sessions(&self) -> Vec<Session> {
        self.store.all()
    }

    /// Find a composite action anywhere in the library by identifier.
    ///
    /// Returns an owned copy, so dispatching it never holds the store lock.
    #[must_use]
    pub fn find_action(&self, id: ActionId) -> Option<SayAndMoveAction> {
        self.store
            .all()
            .into_iter()
            .flat_map(|session| session.items)
            .flat_map(|item| item.actions)
            .find(|action| action.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
