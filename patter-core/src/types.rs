//! Identifier newtypes shared across the library.
//!
//! Every addressable record (session, session item, action, media item)
//! carries a 128-bit random identifier. The zero (nil) UUID doubles as the
//! "not yet assigned" marker: records authored by hand or decoded from an
//! older store file may arrive with nil identifiers, and the libraries fill
//! them in lazily. `Default` therefore yields the nil value, not a fresh
//! random one.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PatterError, Result};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The nil identifier, the zero value of an unassigned field.
            #[must_use]
            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Whether this identifier is still unassigned.
            #[must_use]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            /// Parse an identifier from its string form.
            ///
            /// # Errors
            ///
            /// Returns [`PatterError::InvalidIdentifier`] if `s` is not a
            /// well-formed UUID.
            pub fn parse(s: &str) -> Result<Self> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(PatterError::InvalidIdentifier)
            }

            /// The raw UUID.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::nil()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(
    /// Identifier of a [`crate::session::Session`].
    SessionId
);

id_type!(
    /// Identifier of a [`crate::session::SessionItem`].
    ItemId
);

id_type!(
    /// Identifier of a single action (say, move, or the composite of both).
    ActionId
);

id_type!(
    /// Identifier of a [`crate::media::MediaItem`].
    MediaId
);
