//! Strongly-typed ID wrappers for persisted entities
//!
//! Newtype wrappers keep a source id from being passed where a payout id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

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

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form shown in tables, e.g. `src-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Check whether a user-supplied string refers to this ID
            ///
            /// Accepts the full UUID, or the short form with or without prefix.
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim().to_lowercase();
                let bare = s.strip_prefix($display_prefix).unwrap_or(s.as_str());
                if bare.len() < 8 {
                    return false;
                }
                self.0.to_string() == bare || self.0.simple().to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.short())
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
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(IncomeSourceId, "src-");
define_id!(IncomeEntryId, "inc-");
define_id!(PayoutCategoryId, "cat-");
define_id!(PayoutId, "pay-");
