//! # Identifiers
//!
//! Opaque, typed identifiers for stores, products and sales.
//!
//! ## Why UUID v4?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ids are generated on this device, then written to the snapshot.        │
//! │  On the next start they come back from the snapshot and new ids are     │
//! │  generated next to them.                                                │
//! │                                                                         │
//! │  A counter would restart at 1 and collide with loaded ids.              │
//! │  122 random bits do not.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wrapped value is never interpreted: ids loaded from a snapshot may be
//! any non-empty string.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generates a fresh opaque id (a hyphenated UUID v4 string).
///
/// ## Example
/// ```rust
/// use stocktally_core::ids::generate_id;
///
/// assert_ne!(generate_id(), generate_id());
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a new unique id.
            pub fn generate() -> Self {
                $name(generate_id())
            }

            /// Wraps an existing id (from a snapshot or user input).
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            /// Returns the id as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Store`](crate::types::Store).
    StoreId
);

entity_id!(
    /// Identifier of a [`Product`](crate::types::Product).
    ProductId
);

entity_id!(
    /// Identifier of a [`Sale`](crate::types::Sale).
    SaleId
);
