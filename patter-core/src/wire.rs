//! The wire encoder: one command variant in, one transport message out.
//!
//! The transport format is a small JSON object:
//!
//! ```json
//! { "command": "move", "name": "hello_a010", "content": "<motion/>", "delay": 0 }
//! ```
//!
//! The payload is raw bytes carried as text, since JSON cannot embed binary
//! content directly. Motion files are XML, so the lossy conversion is exact
//! in practice. [`WireMessage`] values are produced only here; nothing else
//! constructs them by hand.

use serde::{Deserialize, Serialize};

use crate::action::{Action, Command};
use crate::error::{PatterError, Result};

/// The transport representation of a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Command tag: `say`, `move`, or `sayAndMove`.
    pub command: Command,
    /// Name the robot can resolve the asset by; may be empty.
    pub name: String,
    /// Raw payload bytes carried as text; may be empty.
    pub content: String,
    /// Delay before execution, in milliseconds.
    pub delay: i64,
}

impl WireMessage {
    /// Encode `action` into its wire form, resolving the payload via
    /// [`Action::content`].
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::AssetUnavailable`] when content resolution
    /// fails. The dispatcher decides whether a name fallback applies; this
    /// encoder does not.
    pub fn encode(action: &Action) -> Result<Self> {
        let content = action.content()?;
        Ok(Self::with_content(action, &content))
    }

    /// Build the wire form of `action` with an already-resolved payload.
    #[must_use]
    pub fn with_content(action: &Action, content: &[u8]) -> Self {
        Self {
            command: action.command(),
            name: action.name().to_string(),
            content: String::from_utf8_lossy(content).into_owned(),
            delay: action.delay_millis(),
        }
    }

    /// Serialize to the JSON text frame written onto the connection.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::Serialization`] on encoder failure. Defensive
    /// only: a message produced by this module always encodes.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| PatterError::Serialization(err.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
