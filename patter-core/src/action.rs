//! The command variant set: the unit of instruction sent to the robot.
//!
//! Three variants exist. [`SayAction`] speaks a phrase, [`MoveAction`] runs a
//! motion, and [`SayAndMoveAction`] composes exactly one of each. The
//! composite is an authoring convenience and is never sent over the wire as
//! a single message; the dispatcher decomposes it (see [`crate::dispatch`]).
//!
//! Content resolution is variant-specific. A say action resolves to the
//! basename of its phrase, a placeholder: the audio itself is played from a
//! speaker co-located with the operator, not transmitted to the robot. A
//! move action resolves to the full bytes of its motion file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PatterError, Result};
use crate::types::ActionId;

// ---------------------------------------------------------------------------
// Command tag
// ---------------------------------------------------------------------------

/// The wire-level command tag of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Speak a phrase.
    Say,
    /// Run a motion.
    Move,
    /// The composite of both; never transmitted itself.
    SayAndMove,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::Say => "say",
            Command::Move => "move",
            Command::SayAndMove => "sayAndMove",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Say
// ---------------------------------------------------------------------------

/// A spoken phrase, optionally backed by a pre-recorded audio file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SayAction {
    /// Identifier; nil until assigned by the library or store.
    #[serde(rename = "ID", default)]
    pub id: ActionId,
    /// The phrase to speak.
    pub phrase: String,
    /// Path to a pre-recorded audio asset. Relative paths are resolved
    /// against the audio root at library assembly time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl SayAction {
    /// The payload for the wire message: the basename of the phrase.
    ///
    /// A placeholder by design. Audio is played locally on the operator's
    /// side, so the robot only ever needs a marker, never the recording.
    ///
    /// # Errors
    ///
    /// Never fails for a say action; the signature matches the other
    /// variants so the dispatcher can treat them uniformly.
    pub fn content(&self) -> Result<Vec<u8>> {
        let base = Path::new(&self.phrase)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(base.into_bytes())
    }

    /// Say actions carry no dispatch delay.
    #[must_use]
    pub fn delay_millis(&self) -> i64 {
        0
    }

    /// Say actions have no name; the robot never resolves them by name.
    #[must_use]
    pub fn name(&self) -> &str {
        ""
    }

    /// A say action is valid once it has an identifier and a phrase.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_nil() && !self.phrase.is_empty()
    }
}

impl fmt::Display for SayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "say {:?}", self.phrase)
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A named motion, optionally backed by a motion-definition file.
///
/// A move without a file path is a placeholder: the robot is expected to
/// hold a motion of the same name and resolve it locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MoveAction {
    /// Identifier; nil until assigned by the library or store.
    #[serde(rename = "ID", default)]
    pub id: ActionId,
    /// Motion name, also the lookup key into the move catalogue.
    pub name: String,
    /// Path to the motion-definition asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// How long the robot should wait before starting the motion.
    #[serde(with = "duration_millis", default)]
    pub delay: Duration,
    /// Group label used to organize the move library.
    #[serde(default)]
    pub group: String,
}

impl MoveAction {
    /// The payload for the wire message: the full bytes of the motion file.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::AssetUnavailable`] when the file path is unset
    /// or the file cannot be read. The caller may recover by falling back to
    /// the motion name, if one is present.
    pub fn content(&self) -> Result<Vec<u8>> {
        let Some(path) = &self.file_path else {
            return Err(PatterError::AssetUnavailable(format!(
                "move {:?} has no motion file path",
                self.name
            )));
        };
        fs::read(path).map_err(|err| {
            PatterError::AssetUnavailable(format!("can't read {}: {err}", path.display()))
        })
    }

    /// Dispatch delay in milliseconds.
    #[must_use]
    pub fn delay_millis(&self) -> i64 {
        self.delay.as_millis() as i64
    }

    /// The motion name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A move is valid once it has an identifier and a motion file path.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_nil() && self.file_path.as_ref().is_some_and(|p| !p.as_os_str().is_empty())
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move {:?}", self.name)
    }
}

// ---------------------------------------------------------------------------
// SayAndMove
// ---------------------------------------------------------------------------

/// A composite of one say and one move, executed together.
///
/// This wrapper is what session items are authored from. It is never sent
/// over the wire itself: the dispatcher transmits the move half only, while
/// the say half plays on the operator's speaker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SayAndMoveAction {
    /// Identifier; nil until assigned by the library or store.
    #[serde(rename = "ID", default)]
    pub id: ActionId,
    /// The spoken half.
    pub say_item: SayAction,
    /// The motion half. May be a name-only placeholder resolved by the
    /// robot or overlaid from the move catalogue at assembly time.
    pub move_item: MoveAction,
}

impl SayAndMoveAction {
    /// The composite itself carries no payload.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other variants.
    pub fn content(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    /// The composite itself carries no dispatch delay.
    #[must_use]
    pub fn delay_millis(&self) -> i64 {
        0
    }

    /// The name of the motion half, the only part resolvable by name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.move_item.name
    }

    /// A composite is valid once it has an identifier and a phrase to speak.
    /// The motion half may legitimately be a name-only placeholder.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_nil() && !self.say_item.phrase.is_empty()
    }

    /// Return the composite with fresh identifiers assigned to itself and to
    /// any half whose identifier is still nil. Already-set identifiers are
    /// preserved.
    #[must_use]
    pub fn with_assigned_ids(mut self) -> Self {
        if self.id.is_nil() {
            self.id = ActionId::new();
        }
        if self.say_item.id.is_nil() {
            self.say_item.id = ActionId::new();
        }
        if self.move_item.id.is_nil() {
            self.move_item.id = ActionId::new();
        }
        self
    }
}

impl fmt::Display for SayAndMoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "say {:?} and move {:?}",
            self.say_item.phrase, self.move_item.name
        )
    }
}

// ---------------------------------------------------------------------------
// The sum type
// ---------------------------------------------------------------------------

/// Any of the three command variants, matched exhaustively by the wire
/// encoder and the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Speak a phrase.
    Say(SayAction),
    /// Run a motion.
    Move(MoveAction),
    /// Speak and move together.
    SayAndMove(SayAndMoveAction),
}

impl Action {
    /// The wire-level command tag of this variant.
    #[must_use]
    pub fn command(&self) -> Command {
        match self {
            Action::Say(_) => Command::Say,
            Action::Move(_) => Command::Move,
            Action::SayAndMove(_) => Command::SayAndMove,
        }
    }

    /// The identifier of this variant.
    #[must_use]
    pub fn id(&self) -> ActionId {
        match self {
            Action::Say(a) => a.id,
            Action::Move(a) => a.id,
            Action::SayAndMove(a) => a.id,
        }
    }

    /// Resolve the payload bytes to embed in a wire message.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::AssetUnavailable`] when a required file is
    /// missing or unset.
    pub fn content(&self) -> Result<Vec<u8>> {
        match self {
            Action::Say(a) => a.content(),
            Action::Move(a) => a.content(),
            Action::SayAndMove(a) => a.content(),
        }
    }

    /// Dispatch delay in milliseconds.
    #[must_use]
    pub fn delay_millis(&self) -> i64 {
        match self {
            Action::Say(a) => a.delay_millis(),
            Action::Move(a) => a.delay_millis(),
            Action::SayAndMove(a) => a.delay_millis(),
        }
    }

    /// The name the robot can resolve the asset by, if any.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Action::Say(a) => a.name(),
            Action::Move(a) => a.name(),
            Action::SayAndMove(a) => a.name(),
        }
    }

    /// Whether the variant's identifier and required fields are in place.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Action::Say(a) => a.is_valid(),
            Action::Move(a) => a.is_valid(),
            Action::SayAndMove(a) => a.is_valid(),
        }
    }
}

impl From<SayAction> for Action {
    fn from(a: SayAction) -> Self {
        Action::Say(a)
    }
}

impl From<MoveAction> for Action {
    fn from(a: MoveAction) -> Self {
        Action::Move(a)
    }
}

impl From<SayAndMoveAction> for Action {
    fn from(a: SayAndMoveAction) -> Self {
        Action::SayAndMove(a)
    }
}

// ---------------------------------------------------------------------------
// Duration <-> milliseconds serde helper
// ---------------------------------------------------------------------------

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
