//! Dispatch of command variants over a live robot connection.
//!
//! The dispatcher owns no connection state. The collaborator that accepted
//! the robot's WebSocket dial-in hands a live handle to every [`send`] call;
//! an absent handle fails fast with [`PatterError::NoConnection`]. Sends are
//! synchronous and unbuffered: one successful call writes exactly one frame,
//! and a write failure propagates unchanged.
//!
//! Two rules with intent behind them live here:
//!
//! - A [`SayAndMoveAction`](crate::action::SayAndMoveAction) composite is
//!   decomposed and only its move half is transmitted. The say half plays
//!   through a speaker next to the operator, not on the robot. This
//!   asymmetry is deliberate.
//! - When content resolution fails but the action carries a name, the error
//!   is suppressed and an empty payload is sent; the robot resolves the
//!   asset locally by name. With no name either, the send fails with
//!   [`PatterError::UnresolvableInstruction`].

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::action::Action;
use crate::error::{PatterError, Result};
use crate::wire::WireMessage;

// ---------------------------------------------------------------------------
// Connection seam
// ---------------------------------------------------------------------------

/// A live, persistent connection to the robot.
///
/// Implementations must block until the frame is handed to the transport.
/// Delivery is fire-and-forget from this layer's perspective: no retries,
/// no acknowledgments.
pub trait Connection {
    /// Write one encoded wire message to the robot.
    ///
    /// # Errors
    ///
    /// Returns [`PatterError::Transport`] when the underlying write fails.
    fn write_message(&mut self, message: &WireMessage) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Send one command variant over `connection`.
///
/// # Errors
///
/// - [`PatterError::NoConnection`] when `connection` is `None`.
/// - [`PatterError::UnresolvableInstruction`] when neither payload bytes nor
///   a fallback name are available.
/// - [`PatterError::Transport`] when the connection write fails.
pub fn send<C: Connection>(action: &Action, connection: Option<&mut C>) -> Result<()> {
    let Some(connection) = connection else {
        return Err(PatterError::NoConnection);
    };

    // The composite never travels whole: only its move half goes out.
    let outgoing: Cow<'_, Action> = match action {
        Action::SayAndMove(composite) => Cow::Owned(Action::Move(composite.move_item.clone())),
        atomic => Cow::Borrowed(atomic),
    };

    let message = encode_with_name_fallback(&outgoing)?;
    debug!(command = %message.command, name = %message.name, delay = message.delay, "dispatching");
    connection.write_message(&message)
}

/// Encode an atomic action, falling back to an empty payload when the asset
/// is unavailable but a name is present for the robot to resolve locally.
fn encode_with_name_fallback(action: &Action) -> Result<WireMessage> {
    match WireMessage::encode(action) {
        Ok(message) => Ok(message),
        Err(err) if !action.name().is_empty() => {
            warn!(name = action.name(), %err, "content unavailable, sending name only");
            Ok(WireMessage::with_content(action, &[]))
        }
        Err(_) => Err(PatterError::UnresolvableInstruction(action.id())),
    }
}

// ---------------------------------------------------------------------------
// Recording stub
// ---------------------------------------------------------------------------

/// A connection that records every frame instead of transmitting it.
///
/// Used by tests and for dry-running a session without a robot attached.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    /// Every message written so far, in order.
    pub messages: Vec<WireMessage>,
}

impl RecordingConnection {
    /// Create an empty recording connection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for RecordingConnection {
    fn write_message(&mut self, message: &WireMessage) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
