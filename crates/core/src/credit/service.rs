//! Credit ledger service.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use fieldops_shared::types::{CreditGrantId, CreditUsageId, MemberId, ProviderId, TravelRecordId};

use super::balance::{CreditStanding, available_credit};
use super::error::CreditError;
use super::types::{ApplyCreditInput, CreditGrant, CreditUsage, NewCreditUsage};

/// Repository trait for credit persistence.
///
/// Implemented by the db crate; the service only sees domain rows.
pub trait CreditRepository: Send + Sync {
    /// All grants owned by a member, across providers.
    fn grants_for_member(
        &self,
        member_id: MemberId,
    ) -> impl std::future::Future<Output = Result<Vec<CreditGrant>, CreditError>> + Send;

    /// All usage entries recorded against a booking.
    fn usages_for_record(
        &self,
        record_id: TravelRecordId,
    ) -> impl std::future::Future<Output = Result<Vec<CreditUsage>, CreditError>> + Send;

    /// The provider identity of a booking, if the booking exists.
    fn record_provider(
        &self,
        record_id: TravelRecordId,
    ) -> impl std::future::Future<Output = Result<Option<ProviderId>, CreditError>> + Send;

    /// Whether the grant exists and is owned by the member.
    fn grant_exists(
        &self,
        grant_id: CreditGrantId,
        member_id: MemberId,
    ) -> impl std::future::Future<Output = Result<bool, CreditError>> + Send;

    /// Append a usage entry to the ledger.
    fn insert_usage(
        &self,
        usage: NewCreditUsage,
    ) -> impl std::future::Future<Output = Result<CreditUsage, CreditError>> + Send;
}

/// A computed balance with its presentation standing.
#[derive(Debug, Clone, Serialize)]
pub struct CreditSummary {
    /// Rounded available amount (may be negative).
    pub available: Decimal,
    /// Zero / positive / overdrawn classification.
    #[serde(flatten)]
    pub standing: CreditStanding,
    /// Display label ("No Credits" or a dollar amount).
    pub label: String,
}

impl CreditSummary {
    fn from_amount(available: Decimal) -> Self {
        let standing = CreditStanding::from_amount(available);
        Self {
            available,
            label: standing.label(),
            standing,
        }
    }
}

/// Result of a successful apply-credit operation.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedCredit {
    /// The ledger entry that was written.
    pub usage: CreditUsage,
    /// The balance recomputed from source rows after the write.
    pub balance: CreditSummary,
}

/// Service for balance queries and credit application.
pub struct CreditService<R: CreditRepository> {
    repo: R,
}

impl<R: CreditRepository> CreditService<R> {
    /// Creates a new credit service.
    #[must_use]
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Computes the credit available to a booking.
    ///
    /// Grants are the owning member's, scoped to the booking's provider;
    /// an empty grant set yields zero. The recomputation always starts from
    /// source rows.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if the booking does not exist, or
    /// `Repository` if a query fails.
    pub async fn balance_for_record(
        &self,
        record_id: TravelRecordId,
        member_id: MemberId,
    ) -> Result<CreditSummary, CreditError> {
        let provider_id = self
            .repo
            .record_provider(record_id)
            .await?
            .ok_or(CreditError::RecordNotFound(record_id))?;

        let grants = self.repo.grants_for_member(member_id).await?;
        let usages = self.repo.usages_for_record(record_id).await?;

        let available = available_credit(provider_id, &grants, &usages);
        if available.is_sign_negative() {
            // Over-application is permitted but monitored.
            warn!(
                record_id = %record_id,
                member_id = %member_id,
                available = %available,
                "credit usage exceeds granted total"
            );
        }

        Ok(CreditSummary::from_amount(available))
    }

    /// Applies credit from a grant against a booking.
    ///
    /// The amount must be non-negative; no upper bound against the
    /// remaining balance is checked. After the write the balance is
    /// recomputed from source rows and returned alongside the new entry.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` for a negative request, `GrantNotFound` /
    /// `RecordNotFound` for missing references, or `Repository` if the
    /// write fails.
    pub async fn apply(&self, input: ApplyCreditInput) -> Result<AppliedCredit, CreditError> {
        if input.amount.is_sign_negative() {
            return Err(CreditError::NegativeAmount(input.amount));
        }

        let owns_grant = self
            .repo
            .grant_exists(input.grant_id, input.member_id)
            .await?;
        if !owns_grant {
            return Err(CreditError::GrantNotFound(input.grant_id));
        }

        // Confirms the booking exists before the ledger write.
        self.repo
            .record_provider(input.travel_record_id)
            .await?
            .ok_or(CreditError::RecordNotFound(input.travel_record_id))?;

        let usage = self
            .repo
            .insert_usage(NewCreditUsage {
                id: CreditUsageId::new(),
                grant_id: input.grant_id,
                travel_record_id: input.travel_record_id,
                amount: input.amount,
                created_by: input.applied_by,
            })
            .await?;

        let balance = self
            .balance_for_record(input.travel_record_id, input.member_id)
            .await?;

        Ok(AppliedCredit { usage, balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldops_shared::types::CreditGrantId;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// In-memory repository for exercising the service.
    struct MockCreditRepository {
        provider: ProviderId,
        record: TravelRecordId,
        grants: Mutex<Vec<CreditGrant>>,
        usages: Mutex<Vec<CreditUsage>>,
        fail_insert: bool,
    }

    impl MockCreditRepository {
        fn new(provider: ProviderId, record: TravelRecordId) -> Self {
            Self {
                provider,
                record,
                grants: Mutex::new(Vec::new()),
                usages: Mutex::new(Vec::new()),
                fail_insert: false,
            }
        }

        fn add_grant(&self, member_id: MemberId, amount: Decimal) -> CreditGrantId {
            let grant = CreditGrant {
                id: CreditGrantId::new(),
                member_id,
                provider_id: self.provider,
                amount,
                reason: None,
                issued_on: Utc::now().date_naive(),
                created_by: "Seeder".to_string(),
                created_at: Utc::now(),
            };
            let id = grant.id;
            self.grants.lock().unwrap().push(grant);
            id
        }
    }

    impl CreditRepository for MockCreditRepository {
        async fn grants_for_member(
            &self,
            member_id: MemberId,
        ) -> Result<Vec<CreditGrant>, CreditError> {
            Ok(self
                .grants
                .lock()
                .unwrap()
                .iter()
                .filter(|g| g.member_id == member_id)
                .cloned()
                .collect())
        }

        async fn usages_for_record(
            &self,
            record_id: TravelRecordId,
        ) -> Result<Vec<CreditUsage>, CreditError> {
            Ok(self
                .usages
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.travel_record_id == record_id)
                .cloned()
                .collect())
        }

        async fn record_provider(
            &self,
            record_id: TravelRecordId,
        ) -> Result<Option<ProviderId>, CreditError> {
            Ok((record_id == self.record).then_some(self.provider))
        }

        async fn grant_exists(
            &self,
            grant_id: CreditGrantId,
            member_id: MemberId,
        ) -> Result<bool, CreditError> {
            Ok(self
                .grants
                .lock()
                .unwrap()
                .iter()
                .any(|g| g.id == grant_id && g.member_id == member_id))
        }

        async fn insert_usage(&self, usage: NewCreditUsage) -> Result<CreditUsage, CreditError> {
            if self.fail_insert {
                return Err(CreditError::repository("connection reset"));
            }
            let row = CreditUsage {
                id: usage.id,
                grant_id: usage.grant_id,
                travel_record_id: usage.travel_record_id,
                amount: usage.amount,
                created_by: usage.created_by,
                created_at: Utc::now(),
            };
            self.usages.lock().unwrap().push(row.clone());
            Ok(row)
        }
    }

    fn input(
        record: TravelRecordId,
        member: MemberId,
        grant: CreditGrantId,
        amount: Decimal,
    ) -> ApplyCreditInput {
        ApplyCreditInput {
            travel_record_id: record,
            member_id: member,
            grant_id: grant,
            amount,
            applied_by: "Dana Cruz".to_string(),
        }
    }

    #[tokio::test]
    async fn test_apply_decreases_balance_exactly() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let grant = repo.add_grant(member, dec!(225.00));
        let service = CreditService::new(repo);

        let before = service.balance_for_record(record, member).await.unwrap();
        assert_eq!(before.available, dec!(225.00));

        let applied = service
            .apply(input(record, member, grant, dec!(50.00)))
            .await
            .unwrap();
        assert_eq!(applied.usage.amount, dec!(50.00));
        assert_eq!(applied.balance.available, dec!(175.00));
        assert_eq!(applied.balance.label, "$175.00");
    }

    #[tokio::test]
    async fn test_drain_to_zero_reads_no_credits() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let grant = repo.add_grant(member, dec!(175.00));
        let service = CreditService::new(repo);

        let applied = service
            .apply(input(record, member, grant, dec!(175.00)))
            .await
            .unwrap();
        assert_eq!(applied.balance.available, dec!(0.00));
        assert_eq!(applied.balance.standing, CreditStanding::NoCredits);
        assert_eq!(applied.balance.label, "No Credits");
    }

    #[tokio::test]
    async fn test_over_application_is_permitted_and_goes_negative() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let grant = repo.add_grant(member, dec!(40.00));
        let service = CreditService::new(repo);

        // No balance cap at write time: the ledger accepts the entry and
        // the recomputed balance goes negative.
        let applied = service
            .apply(input(record, member, grant, dec!(65.00)))
            .await
            .unwrap();
        assert_eq!(applied.balance.available, dec!(-25.00));
        assert!(applied.balance.standing.is_overdrawn());
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let grant = repo.add_grant(member, dec!(100.00));
        let service = CreditService::new(repo);

        let result = service.apply(input(record, member, grant, dec!(-5.00))).await;
        assert!(matches!(result, Err(CreditError::NegativeAmount(_))));
    }

    #[tokio::test]
    async fn test_zero_amount_is_accepted() {
        // Non-numeric input is coerced to zero upstream; zero is a valid,
        // if pointless, application.
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let grant = repo.add_grant(member, dec!(100.00));
        let service = CreditService::new(repo);

        let applied = service
            .apply(input(record, member, grant, Decimal::ZERO))
            .await
            .unwrap();
        assert_eq!(applied.balance.available, dec!(100.00));
    }

    #[tokio::test]
    async fn test_unknown_grant_rejected() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let service = CreditService::new(repo);

        let result = service
            .apply(input(record, member, CreditGrantId::new(), dec!(10.00)))
            .await;
        assert!(matches!(result, Err(CreditError::GrantNotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_record_rejected() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let repo = MockCreditRepository::new(provider, record);
        let grant = repo.add_grant(member, dec!(100.00));
        let service = CreditService::new(repo);

        let result = service
            .apply(input(TravelRecordId::new(), member, grant, dec!(10.00)))
            .await;
        assert!(matches!(result, Err(CreditError::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn test_insert_failure_surfaces_as_repository_error() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let member = MemberId::new();
        let mut repo = MockCreditRepository::new(provider, record);
        repo.fail_insert = true;
        let grant = repo.add_grant(member, dec!(100.00));
        let service = CreditService::new(repo);

        let result = service.apply(input(record, member, grant, dec!(10.00))).await;
        assert!(matches!(result, Err(CreditError::Repository(_))));
    }

    #[tokio::test]
    async fn test_balance_for_unknown_record() {
        let repo = MockCreditRepository::new(ProviderId::new(), TravelRecordId::new());
        let service = CreditService::new(repo);

        let result = service
            .balance_for_record(TravelRecordId::new(), MemberId::new())
            .await;
        assert!(matches!(result, Err(CreditError::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn test_member_without_grants_sees_no_credits() {
        let provider = ProviderId::new();
        let record = TravelRecordId::new();
        let repo = MockCreditRepository::new(provider, record);
        let service = CreditService::new(repo);

        let summary = service
            .balance_for_record(record, MemberId::new())
            .await
            .unwrap();
        assert_eq!(summary.available, Decimal::ZERO);
        assert_eq!(summary.standing, CreditStanding::NoCredits);
    }
}
