//! Newtype identifiers.
//!
//! String ids identify host-side entities (stores); numeric ids mirror the
//! commerce engine's integer identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate string-backed id newtypes.
macro_rules! define_str_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create an id from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

/// Macro to generate engine-side numeric id newtypes.
macro_rules! define_num_id {
    ($name:ident) => {
        /// An engine-side numeric identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Create an id from its raw value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_str_id!(StoreId);

define_num_id!(CustomerId);
define_num_id!(ProductId);
define_num_id!(LineId);
define_num_id!(GroupId);

impl CustomerId {
    /// The engine's sentinel for "no authenticated customer".
    pub const NONE: CustomerId = CustomerId(-1);

    /// Whether this id refers to a registered customer.
    ///
    /// Negative ids are the engine's guest/none sentinels.
    pub const fn is_registered(&self) -> bool {
        self.0 >= 0
    }
}

impl GroupId {
    /// Group ids must be positive to gate store access.
    pub const fn is_assignable(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_id_display() {
        let id = StoreId::new("store1");
        assert_eq!(id.as_str(), "store1");
        assert_eq!(format!("{}", id), "store1");
    }

    #[test]
    fn customer_id_sentinel() {
        assert!(!CustomerId::NONE.is_registered());
        assert!(!CustomerId::new(-7).is_registered());
        assert!(CustomerId::new(0).is_registered());
        assert!(CustomerId::new(42).is_registered());
    }

    #[test]
    fn group_id_assignable() {
        assert!(GroupId::new(7).is_assignable());
        assert!(!GroupId::new(0).is_assignable());
        assert!(!GroupId::new(-1).is_assignable());
    }

    #[test]
    fn numeric_id_equality() {
        assert_eq!(CustomerId::new(5), CustomerId::from(5));
        assert_ne!(LineId::new(1), LineId::new(2));
    }
}
