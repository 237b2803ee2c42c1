//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `AdminId` where an
//! `EmployeeId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(AllocationId, "Unique identifier for a salary allocation record.");
typed_id!(AdminId, "Unique identifier for an administrator.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(EmployeeId::new(), EmployeeId::new());
        assert_ne!(AllocationId::new(), AllocationId::new());
    }

    #[test]
    fn test_roundtrip_through_uuid() {
        let id = EmployeeId::new();
        let uuid: Uuid = id.into();
        assert_eq!(EmployeeId::from(uuid), id);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_display_and_parse() {
        let id = AdminId::new();
        let parsed = AdminId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(EmployeeId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let a = EmployeeId::new();
        let b = EmployeeId::new();
        assert!(a.into_inner() <= b.into_inner());
    }
}
