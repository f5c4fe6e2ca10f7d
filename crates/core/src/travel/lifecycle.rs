//! Derived status and list visibility for travel records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::TravelFlags;

/// Status label derived from the lifecycle flags.
///
/// Cancellation takes precedence over verification; a record with neither
/// flag reads as pending reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStatus {
    /// The trip did not occur.
    Canceled,
    /// Confirmed against actual charges.
    Verified,
    /// Entered but not yet reconciled.
    Pending,
}

impl TravelStatus {
    /// Derives the status label from a record's flags.
    #[must_use]
    pub const fn from_flags(flags: &TravelFlags) -> Self {
        if flags.canceled {
            Self::Canceled
        } else if flags.verified {
            Self::Verified
        } else {
            Self::Pending
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canceled => "Canceled",
            Self::Verified => "Verified",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for TravelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a record appears in a list view.
///
/// Archived records are excluded from default views and included only when
/// the show-archived toggle is active. Canceled records still list - the
/// cancellation shows through the status label instead.
#[must_use]
pub const fn is_listed(flags: &TravelFlags, show_archived: bool) -> bool {
    show_archived || !flags.archived
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, TravelStatus::Pending)]
    #[case(true, false, TravelStatus::Verified)]
    #[case(false, true, TravelStatus::Canceled)]
    #[case(true, true, TravelStatus::Canceled)] // cancellation wins
    fn test_status_derivation(
        #[case] verified: bool,
        #[case] canceled: bool,
        #[case] expected: TravelStatus,
    ) {
        let flags = TravelFlags {
            archived: false,
            verified,
            canceled,
        };
        assert_eq!(TravelStatus::from_flags(&flags), expected);
    }

    #[test]
    fn test_archived_does_not_change_status() {
        let flags = TravelFlags {
            archived: true,
            verified: true,
            canceled: false,
        };
        assert_eq!(TravelStatus::from_flags(&flags), TravelStatus::Verified);
    }

    #[rstest]
    #[case(false, false, true)] // active record, default view
    #[case(true, false, false)] // archived hidden by default
    #[case(true, true, true)] // toggle surfaces archived
    #[case(false, true, true)] // toggle never hides active records
    fn test_list_visibility(
        #[case] archived: bool,
        #[case] show_archived: bool,
        #[case] listed: bool,
    ) {
        let flags = TravelFlags {
            archived,
            verified: false,
            canceled: false,
        };
        assert_eq!(is_listed(&flags, show_archived), listed);
    }

    #[test]
    fn test_canceled_records_still_list() {
        let flags = TravelFlags {
            archived: false,
            verified: false,
            canceled: true,
        };
        assert!(is_listed(&flags, false));
    }
}
