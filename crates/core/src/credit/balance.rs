//! Available-credit computation.
//!
//! `available = sum(grants matching the record's provider) - sum(usages on
//! the record)`, rounded to currency precision. The subtraction is allowed
//! to go negative: usage beyond the granted total is a data-integrity
//! signal that must surface, not crash or clamp.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fieldops_shared::types::ProviderId;
use fieldops_shared::types::money::{format_usd, round_currency};

use super::types::{CreditGrant, CreditUsage};

/// Computes the credit available to a booking.
///
/// Grants are filtered to the booking's provider; usages are the booking's
/// own ledger entries. An empty grant set contributes zero. The result is
/// rounded to two decimal places and may be negative.
#[must_use]
pub fn available_credit(
    provider_id: ProviderId,
    grants: &[CreditGrant],
    usages: &[CreditUsage],
) -> Decimal {
    let granted: Decimal = grants
        .iter()
        .filter(|grant| grant.provider_id == provider_id)
        .map(|grant| grant.amount)
        .sum();
    let used: Decimal = usages.iter().map(|usage| usage.amount).sum();

    round_currency(granted - used)
}

/// Presentation standing of a computed balance.
///
/// Exactly zero is shown as "No Credits" rather than "$0.00"; a negative
/// balance is an overdraw that passes through for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "standing", content = "amount", rename_all = "snake_case")]
pub enum CreditStanding {
    /// No credit remains (balance is exactly zero).
    NoCredits,
    /// A positive balance remains.
    Available(Decimal),
    /// Usage exceeds grants; the negative balance is carried unclamped.
    Overdrawn(Decimal),
}

impl CreditStanding {
    /// Classifies a computed balance.
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        if amount.is_zero() {
            Self::NoCredits
        } else if amount.is_sign_negative() {
            Self::Overdrawn(amount)
        } else {
            Self::Available(amount)
        }
    }

    /// Returns the display label: `No Credits`, `$175.00`, `-$25.00`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::NoCredits => "No Credits".to_string(),
            Self::Available(amount) | Self::Overdrawn(amount) => format_usd(*amount),
        }
    }

    /// Returns true when usage exceeds the granted total.
    #[must_use]
    pub const fn is_overdrawn(&self) -> bool {
        matches!(self, Self::Overdrawn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldops_shared::types::{CreditGrantId, CreditUsageId, MemberId, TravelRecordId};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn grant(provider_id: ProviderId, amount: Decimal) -> CreditGrant {
        CreditGrant {
            id: CreditGrantId::new(),
            member_id: MemberId::new(),
            provider_id,
            amount,
            reason: None,
            issued_on: Utc::now().date_naive(),
            created_by: "Test User".to_string(),
            created_at: Utc::now(),
        }
    }

    fn usage(amount: Decimal) -> CreditUsage {
        CreditUsage {
            id: CreditUsageId::new(),
            grant_id: CreditGrantId::new(),
            travel_record_id: TravelRecordId::new(),
            amount,
            created_by: "Test User".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_spec_scenario() {
        // Two grants ($150, $75) against provider P, one $50 usage.
        let provider = ProviderId::new();
        let grants = vec![grant(provider, dec!(150.00)), grant(provider, dec!(75.00))];
        let usages = vec![usage(dec!(50.00))];

        assert_eq!(available_credit(provider, &grants, &usages), dec!(175.00));
    }

    #[test]
    fn test_drained_to_zero_reads_no_credits() {
        let provider = ProviderId::new();
        let grants = vec![grant(provider, dec!(150.00)), grant(provider, dec!(75.00))];
        let usages = vec![usage(dec!(50.00)), usage(dec!(175.00))];

        let available = available_credit(provider, &grants, &usages);
        assert_eq!(available, dec!(0.00));

        let standing = CreditStanding::from_amount(available);
        assert_eq!(standing, CreditStanding::NoCredits);
        assert_eq!(standing.label(), "No Credits");
    }

    #[test]
    fn test_no_grants_is_zero_not_an_error() {
        let provider = ProviderId::new();
        assert_eq!(available_credit(provider, &[], &[]), Decimal::ZERO);
    }

    #[test]
    fn test_other_provider_grants_excluded() {
        let provider = ProviderId::new();
        let other = ProviderId::new();
        let grants = vec![grant(provider, dec!(100.00)), grant(other, dec!(400.00))];

        assert_eq!(available_credit(provider, &grants, &[]), dec!(100.00));
    }

    #[test]
    fn test_over_application_goes_negative() {
        let provider = ProviderId::new();
        let grants = vec![grant(provider, dec!(40.00))];
        let usages = vec![usage(dec!(65.00))];

        let available = available_credit(provider, &grants, &usages);
        assert_eq!(available, dec!(-25.00));

        let standing = CreditStanding::from_amount(available);
        assert!(standing.is_overdrawn());
        assert_eq!(standing.label(), "-$25.00");
    }

    #[test]
    fn test_positive_standing_label() {
        let standing = CreditStanding::from_amount(dec!(175));
        assert_eq!(standing, CreditStanding::Available(dec!(175)));
        assert_eq!(standing.label(), "$175.00");
    }

    /// Strategy for cent-denominated amounts in [0, 10_000.00].
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The balance equals the rounded difference of the two sums for
        /// any grant/usage multiset against a single provider.
        #[test]
        fn prop_balance_is_sum_minus_sum(
            grant_amounts in prop::collection::vec(amount_strategy(), 0..8),
            usage_amounts in prop::collection::vec(amount_strategy(), 0..8),
        ) {
            let provider = ProviderId::new();
            let grants: Vec<_> = grant_amounts.iter().map(|a| grant(provider, *a)).collect();
            let usages: Vec<_> = usage_amounts.iter().map(|a| usage(*a)).collect();

            let expected: Decimal = grant_amounts.iter().copied().sum::<Decimal>()
                - usage_amounts.iter().copied().sum::<Decimal>();

            prop_assert_eq!(
                available_credit(provider, &grants, &usages),
                expected.round_dp(2)
            );
        }

        /// Grants against other providers never move the balance.
        #[test]
        fn prop_foreign_grants_ignored(
            matching in prop::collection::vec(amount_strategy(), 0..6),
            foreign in prop::collection::vec(amount_strategy(), 0..6),
        ) {
            let provider = ProviderId::new();
            let other = ProviderId::new();

            let mut grants: Vec<_> = matching.iter().map(|a| grant(provider, *a)).collect();
            let baseline = available_credit(provider, &grants, &[]);

            grants.extend(foreign.iter().map(|a| grant(other, *a)));
            prop_assert_eq!(available_credit(provider, &grants, &[]), baseline);
        }

        /// Appending a usage of `a` decreases a recomputation by exactly `a`.
        #[test]
        fn prop_usage_decreases_balance_exactly(
            grant_amounts in prop::collection::vec(amount_strategy(), 0..6),
            usage_amounts in prop::collection::vec(amount_strategy(), 0..6),
            applied in amount_strategy(),
        ) {
            let provider = ProviderId::new();
            let grants: Vec<_> = grant_amounts.iter().map(|a| grant(provider, *a)).collect();
            let mut usages: Vec<_> = usage_amounts.iter().map(|a| usage(*a)).collect();

            let before = available_credit(provider, &grants, &usages);
            usages.push(usage(applied));
            let after = available_credit(provider, &grants, &usages);

            prop_assert_eq!(before - after, applied);
        }

        /// Standing classification matches the sign of the amount.
        #[test]
        fn prop_standing_matches_sign(cents in -1_000_000i64..1_000_000) {
            let amount = Decimal::new(cents, 2);
            let standing = CreditStanding::from_amount(amount);
            match standing {
                CreditStanding::NoCredits => prop_assert!(amount.is_zero()),
                CreditStanding::Available(a) => {
                    prop_assert!(a > Decimal::ZERO);
                    prop_assert_eq!(a, amount);
                }
                CreditStanding::Overdrawn(a) => {
                    prop_assert!(a < Decimal::ZERO);
                    prop_assert_eq!(a, amount);
                }
            }
        }
    }
}
