//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `MemberId` where a
//! `TravelRecordId` is expected.

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
    };
}

typed_id!(MemberId, "Unique identifier for a member (field technician).");
typed_id!(ProjectId, "Unique identifier for a project.");
typed_id!(ProviderId, "Unique identifier for a travel provider.");
typed_id!(TravelRecordId, "Unique identifier for a travel record.");
typed_id!(CreditGrantId, "Unique identifier for a credit grant.");
typed_id!(CreditUsageId, "Unique identifier for a credit usage entry.");
typed_id!(ApprovalRecordId, "Unique identifier for an approval record.");
typed_id!(NoteId, "Unique identifier for a note.");
typed_id!(AttachmentId, "Unique identifier for an attachment.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(MemberId::new(), MemberId::new());
    }

    #[test]
    fn test_roundtrip_through_string() {
        let id = TravelRecordId::new();
        let parsed = TravelRecordId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = CreditGrantId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_invalid_string_rejected() {
        assert!(MemberId::from_str("not-a-uuid").is_err());
    }
}
