//! # patter-link — the robot transport
//!
//! A thin, blocking WebSocket client implementing the core's
//! [`Connection`](patter_core::dispatch::Connection) seam with
//! `tungstenite`. The core stays transport-agnostic; everything that knows
//! about sockets lives here.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]

pub mod error;
pub mod link;

pub use error::LinkError;
pub use link::RobotLink;
