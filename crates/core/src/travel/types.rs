//! Travel record domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of booking a travel record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelKind {
    /// Airline booking.
    Flight,
    /// Hotel reservation.
    Hotel,
    /// Vehicle rental.
    Rental,
}

impl TravelKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Hotel => "hotel",
            Self::Rental => "rental",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flight" => Some(Self::Flight),
            "hotel" => Some(Self::Hotel),
            "rental" => Some(Self::Rental),
            _ => None,
        }
    }
}

impl fmt::Display for TravelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three independent lifecycle flags on a travel record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelFlags {
    /// Hidden from default list views.
    pub archived: bool,
    /// Confirmed against actual charges.
    pub verified: bool,
    /// The trip did not occur.
    pub canceled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [TravelKind::Flight, TravelKind::Hotel, TravelKind::Rental] {
            assert_eq!(TravelKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TravelKind::parse("train"), None);
    }

    #[test]
    fn test_new_record_flags_default_clear() {
        let flags = TravelFlags::default();
        assert!(!flags.archived);
        assert!(!flags.verified);
        assert!(!flags.canceled);
    }
}
