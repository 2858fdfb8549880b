//! # Patter Core Library
//!
//! Robot-agnostic core for driving a humanoid service robot from authored
//! conversation scripts:
//!
//! - **Actions** — the command variant set: say, move, or both composed
//! - **Wire** — one variant in, one JSON transport message out
//! - **Dispatch** — content resolution, the composite fan-out rule, and the
//!   single write onto a caller-supplied connection
//! - **Store** — a concurrency-safe collection of identifiable records
//!   mirrored to one JSON file, fully rewritten on every mutation
//! - **Sessions** — the scripted dialogue library, assembled at load time
//! - **Media** — the uploaded-image catalogue that owns its files
//!
//! The serving layer (HTTP routes, the robot's WebSocket dial-in, process
//! startup) lives outside this crate and hands in live handles: a
//! [`dispatch::Connection`] per send, store paths at construction.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod catalogue;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod media;
pub mod session;
pub mod store;
pub mod types;
pub mod wire;

pub use action::{Action, Command, MoveAction, SayAction, SayAndMoveAction};
pub use catalogue::MoveCatalogue;
pub use config::PatterConfig;
pub use dispatch::{Connection, send};
pub use error::{PatterError, Result};
pub use media::{MediaItem, MediaLibrary};
pub use session::{Session, SessionItem, SessionLibrary};
pub use store::{Record, Store};
pub use types::{ActionId, ItemId, MediaId, SessionId};
pub use wire::WireMessage;
