//! The live WebSocket link to the robot-side app.
//!
//! One [`RobotLink`] wraps one blocking socket. In the usual topology the
//! robot dials in and the serving layer wraps the accepted stream with
//! [`RobotLink::accept`]; [`RobotLink::connect`] covers the reverse setup
//! and tests. Either way the serving layer keeps the link for the lifetime
//! of the connection and hands a mutable borrow to every
//! [`patter_core::dispatch::send`] call; the dispatcher never manages
//! connection lifecycle itself.

use std::io::{Read, Write};
use std::net::TcpStream;

use tracing::{debug, info};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use patter_core::dispatch::Connection;
use patter_core::error::PatterError;
use patter_core::wire::WireMessage;

use crate::error::LinkError;

/// A live, persistent connection to one robot.
pub struct RobotLink<S = MaybeTlsStream<TcpStream>> {
    socket: WebSocket<S>,
    peer: String,
}

impl RobotLink<MaybeTlsStream<TcpStream>> {
    /// Dial `endpoint` and complete the client side of the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Transport`] when the endpoint is unreachable or
    /// the handshake fails.
    pub fn connect(endpoint: &str) -> Result<Self, LinkError> {
        let (socket, response) = tungstenite::connect(endpoint)?;
        info!(endpoint, status = %response.status(), "robot link established");
        Ok(Self {
            socket,
            peer: endpoint.to_string(),
        })
    }
}

impl<S: Read + Write> RobotLink<S> {
    /// Accept the robot's dial-in on an already-established stream and
    /// complete the server side of the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Handshake`] when the handshake fails.
    pub fn accept(stream: S, peer: &str) -> Result<Self, LinkError> {
        let socket =
            tungstenite::accept(stream).map_err(|err| LinkError::Handshake(err.to_string()))?;
        info!(peer, "robot dialed in");
        Ok(Self {
            socket,
            peer: peer.to_string(),
        })
    }

    /// The peer this link is attached to.
    #[must_use]
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Close the link. The robot is expected to dial in again.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Transport`] when the close frame cannot be sent.
    pub fn close(&mut self) -> Result<(), LinkError> {
        self.socket.close(None)?;
        debug!(peer = %self.peer, "robot link closed");
        Ok(())
    }
}

impl<S: Read + Write> Connection for RobotLink<S> {
    /// Write one wire message as a single JSON text frame.
    ///
    /// Blocking and fire-and-forget: the frame is flushed to the transport,
    /// no acknowledgment is awaited, and a failure propagates unchanged.
    fn write_message(&mut self, message: &WireMessage) -> patter_core::Result<()> {
        let raw = message.to_json()?;
        self.socket
            .send(Message::Text(raw.into()))
            .map_err(|err| PatterError::Transport(err.to_string()))
    }
}
