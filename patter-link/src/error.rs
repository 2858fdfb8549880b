//! Link error types.

use thiserror::Error;

/// Errors that can occur while establishing or using the robot link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The WebSocket write or close failed, or the dial-out could not
    /// reach the endpoint.
    #[error("robot link transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    /// Accepting the robot's dial-in failed mid-handshake.
    #[error("robot handshake failed: {0}")]
    Handshake(String),
}
