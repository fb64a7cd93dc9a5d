//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form used for display, e.g. `exp-1a2b3c4d`
            pub fn short(&self) -> String {
                let simple = self.0.simple().to_string();
                format!("{}{}", $display_prefix, &simple[..8])
            }

            /// Whether `identifier` names this ID: the full UUID, the short form,
            /// or a bare hex prefix of at least four characters
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                let bare = identifier
                    .strip_prefix($display_prefix)
                    .unwrap_or(identifier)
                    .to_ascii_lowercase();
                if let Ok(uuid) = Uuid::parse_str(&bare) {
                    return uuid == self.0;
                }
                bare.len() >= 4
                    && bare.chars().all(|c| c.is_ascii_hexdigit())
                    && self.0.simple().to_string().starts_with(&bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(ExpenseId, "exp-");
