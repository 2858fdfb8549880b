//! Error types for the patter core library.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::types::ActionId;

/// Top-level error type for all patter operations.
#[derive(Error, Debug)]
pub enum PatterError {
    /// Dispatch was attempted without a live connection handle.
    /// The robot initiates the connection; until it has, nothing can be sent.
    #[error("no live connection to the robot, the robot must initiate it first")]
    NoConnection,

    /// An instruction has neither resolvable content nor a name the robot
    /// could use to resolve the asset on its own side.
    #[error("instruction {0} has no content and no name to resolve it remotely")]
    UnresolvableInstruction(ActionId),

    /// A required asset file is missing or unset. Recoverable by the
    /// dispatcher when the instruction carries a name; fatal otherwise.
    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),

    /// A record identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] uuid::Error),

    /// No record with the given identifier exists in the store.
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// Identifiers are assigned by the store; callers must not supply one
    /// on create.
    #[error("identifier must not be set on create, the store assigns it")]
    IdentifierNotAllowed,

    /// A session references an audio asset that does not exist on disk.
    /// Fatal to library assembly: no partially valid library is produced.
    #[error("missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    /// A write to the robot connection failed.
    #[error("connection write failed: {0}")]
    Transport(String),

    /// JSON encode/decode failure in a store file or wire message.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PatterError>;
