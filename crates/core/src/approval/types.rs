//! Approval workflow domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use fieldops_shared::types::{ApprovalRecordId, MemberId};

/// Kind of approval tracked for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    /// Project background check.
    BackgroundCheck,
    /// Security clearance.
    Clearance,
    /// TSA badge vetting.
    Tsa,
}

impl ApprovalType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackgroundCheck => "background_check",
            Self::Clearance => "clearance",
            Self::Tsa => "tsa",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "background_check" => Some(Self::BackgroundCheck),
            "clearance" => Some(Self::Clearance),
            "tsa" => Some(Self::Tsa),
            _ => None,
        }
    }

    /// The statuses a record of this type may hold.
    ///
    /// Background check and clearance reviews end in "Rejected"; TSA
    /// vetting ends in "Failed". Every set includes the shared
    /// "In Progress" and "Approved".
    #[must_use]
    pub const fn statuses(&self) -> &'static [ApprovalStatus] {
        match self {
            Self::BackgroundCheck | Self::Clearance => &[
                ApprovalStatus::InProgress,
                ApprovalStatus::Approved,
                ApprovalStatus::Rejected,
            ],
            Self::Tsa => &[
                ApprovalStatus::InProgress,
                ApprovalStatus::Approved,
                ApprovalStatus::Failed,
            ],
        }
    }
}

impl fmt::Display for ApprovalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of an approval record.
///
/// Any status may be set to any other within the record's type set; no
/// transition is rejected and no status is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Review underway. Initial status on creation.
    InProgress,
    /// Review passed.
    Approved,
    /// Review rejected (background check / clearance).
    Rejected,
    /// Vetting failed (TSA).
    Failed,
}

impl ApprovalStatus {
    /// Returns the display label for the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Failed => "Failed",
        }
    }

    /// Parses a status from its display label or snake_case form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "in_progress" => Some(Self::InProgress),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns true if a record of the given type may hold this status.
    #[must_use]
    pub fn is_valid_for(self, approval_type: ApprovalType) -> bool {
        approval_type.statuses().contains(&self)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// PIV badge status carried by TSA-type records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivStatus {
    /// Badge requested, not yet issued.
    Pending,
    /// Badge issued.
    Issued,
    /// Badge revoked.
    Revoked,
}

impl PivStatus {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Issued => "issued",
            Self::Revoked => "revoked",
        }
    }

    /// Parses a PIV status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "issued" => Some(Self::Issued),
            "revoked" => Some(Self::Revoked),
            _ => None,
        }
    }
}

/// An approval record: one row per (member, approval type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRecord {
    /// Unique identifier.
    pub id: ApprovalRecordId,
    /// Member under review.
    pub member_id: MemberId,
    /// Kind of approval.
    pub approval_type: ApprovalType,
    /// Current status.
    pub status: ApprovalStatus,
    /// PIV badge status (TSA records only).
    pub piv_status: Option<PivStatus>,
    /// Whether supporting documents have been collected.
    pub document_collected: bool,
    /// Date the review was submitted.
    pub submitted_on: Option<NaiveDate>,
    /// Date the review was approved.
    pub approved_on: Option<NaiveDate>,
    /// Display name of the last editor (free text, not a foreign key).
    pub updated_by: String,
    /// Wall-clock time of the last update.
    pub last_activity: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_type_roundtrip() {
        for t in [
            ApprovalType::BackgroundCheck,
            ApprovalType::Clearance,
            ApprovalType::Tsa,
        ] {
            assert_eq!(ApprovalType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ApprovalType::parse("unknown"), None);
    }

    #[test]
    fn test_status_parse_accepts_display_labels() {
        assert_eq!(
            ApprovalStatus::parse("In Progress"),
            Some(ApprovalStatus::InProgress)
        );
        assert_eq!(
            ApprovalStatus::parse("in_progress"),
            Some(ApprovalStatus::InProgress)
        );
        assert_eq!(ApprovalStatus::parse("APPROVED"), Some(ApprovalStatus::Approved));
        assert_eq!(ApprovalStatus::parse("done"), None);
    }

    #[rstest]
    #[case(ApprovalType::BackgroundCheck, ApprovalStatus::Rejected, true)]
    #[case(ApprovalType::BackgroundCheck, ApprovalStatus::Failed, false)]
    #[case(ApprovalType::Clearance, ApprovalStatus::Rejected, true)]
    #[case(ApprovalType::Clearance, ApprovalStatus::Failed, false)]
    #[case(ApprovalType::Tsa, ApprovalStatus::Failed, true)]
    #[case(ApprovalType::Tsa, ApprovalStatus::Rejected, false)]
    fn test_negative_outcome_depends_on_type(
        #[case] approval_type: ApprovalType,
        #[case] status: ApprovalStatus,
        #[case] valid: bool,
    ) {
        assert_eq!(status.is_valid_for(approval_type), valid);
    }

    #[test]
    fn test_shared_statuses_valid_everywhere() {
        for t in [
            ApprovalType::BackgroundCheck,
            ApprovalType::Clearance,
            ApprovalType::Tsa,
        ] {
            assert!(ApprovalStatus::InProgress.is_valid_for(t));
            assert!(ApprovalStatus::Approved.is_valid_for(t));
        }
    }

    #[test]
    fn test_piv_roundtrip() {
        for p in [PivStatus::Pending, PivStatus::Issued, PivStatus::Revoked] {
            assert_eq!(PivStatus::parse(p.as_str()), Some(p));
        }
        assert_eq!(PivStatus::parse("expired"), None);
    }
}
