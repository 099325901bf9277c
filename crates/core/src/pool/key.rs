//! Pool key derivation and canonical encoding.
//!
//! A pool key identifies one capped fund source. Two disbursements with
//! an equal key compete for the same capacity; unequal keys never share
//! capacity, which is what keeps the three qurban sub-pools of a single
//! period independent.

use std::fmt;
use uuid::Uuid;

use crate::disbursement::error::EngineError;
use crate::disbursement::types::DisbursementCategory;

/// The kind of reference a pool draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolReference {
    /// A donation campaign's collected total.
    Campaign,
    /// A zakat collection period's program amount.
    ZakatPeriod,
    /// A qurban period's per-category collected value.
    QurbanPeriod,
    /// A revenue-share entitlement ledger.
    RevenueShare,
}

impl PoolReference {
    /// Returns the string representation of the reference type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::ZakatPeriod => "zakat_period",
            Self::QurbanPeriod => "qurban_period",
            Self::RevenueShare => "revenue_share",
        }
    }

    /// Parses a reference type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "campaign" => Some(Self::Campaign),
            "zakat_period" => Some(Self::ZakatPeriod),
            "qurban_period" => Some(Self::QurbanPeriod),
            "revenue_share" => Some(Self::RevenueShare),
            _ => None,
        }
    }
}

impl fmt::Display for PoolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Composite identity of a capped fund pool.
///
/// Canonical string form is `reference_type/reference_id/category`, with
/// `-` standing in for an absent reference id (the shared developer
/// revenue-share pool). The canonical form is what gets persisted on
/// disbursement rows and used for pool-scoped advisory locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey {
    /// The kind of reference the pool draws from.
    pub reference: PoolReference,
    /// The campaign/period/recipient the pool belongs to, when keyed.
    pub reference_id: Option<Uuid>,
    /// The category whose capacity this pool caps.
    pub category: DisbursementCategory,
}

impl PoolKey {
    /// Pool for a campaign's beneficiary payouts.
    #[must_use]
    pub fn campaign(campaign_id: Uuid) -> Self {
        Self {
            reference: PoolReference::Campaign,
            reference_id: Some(campaign_id),
            category: DisbursementCategory::CampaignToBeneficiary,
        }
    }

    /// Pool for a zakat period's distributions.
    #[must_use]
    pub fn zakat_period(period_id: Uuid) -> Self {
        Self {
            reference: PoolReference::ZakatPeriod,
            reference_id: Some(period_id),
            category: DisbursementCategory::ZakatToMustahiq,
        }
    }

    /// One of the three independently capped sub-pools of a qurban period.
    #[must_use]
    pub fn qurban_period(period_id: Uuid, category: DisbursementCategory) -> Self {
        Self {
            reference: PoolReference::QurbanPeriod,
            reference_id: Some(period_id),
            category,
        }
    }

    /// Per-recipient revenue-share entitlement pool.
    #[must_use]
    pub fn revenue_share(recipient_id: Uuid, category: DisbursementCategory) -> Self {
        Self {
            reference: PoolReference::RevenueShare,
            reference_id: Some(recipient_id),
            category,
        }
    }

    /// The single shared developer revenue-share pool.
    #[must_use]
    pub fn revenue_share_developer() -> Self {
        Self {
            reference: PoolReference::RevenueShare,
            reference_id: None,
            category: DisbursementCategory::RevenueShareDeveloper,
        }
    }

    /// Derives the pool a disbursement draws against, from its category
    /// plus the reference and recipient-directory ids on the payload.
    ///
    /// Returns `Ok(None)` for the uncapped categories
    /// (`operational_expense`, `vendor_payment`), which draw from no pool.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceRequired` when a pooled category is missing its
    /// campaign/period id, and `RecipientRequired` when a per-recipient
    /// revenue-share category is missing a directory-resolved recipient.
    pub fn derive(
        category: DisbursementCategory,
        reference_id: Option<Uuid>,
        recipient_id: Option<Uuid>,
    ) -> Result<Option<Self>, EngineError> {
        let key = match category {
            DisbursementCategory::CampaignToBeneficiary => Self::campaign(
                reference_id.ok_or(EngineError::ReferenceRequired(category))?,
            ),
            DisbursementCategory::ZakatToMustahiq => Self::zakat_period(
                reference_id.ok_or(EngineError::ReferenceRequired(category))?,
            ),
            DisbursementCategory::QurbanPurchaseSapi
            | DisbursementCategory::QurbanPurchaseKambing
            | DisbursementCategory::QurbanExecutionFee => Self::qurban_period(
                reference_id.ok_or(EngineError::ReferenceRequired(category))?,
                category,
            ),
            DisbursementCategory::OperationalExpense | DisbursementCategory::VendorPayment => {
                return Ok(None);
            }
            DisbursementCategory::RevenueShareMitra
            | DisbursementCategory::RevenueShareFundraiser => Self::revenue_share(
                recipient_id.ok_or(EngineError::RecipientRequired(category))?,
                category,
            ),
            DisbursementCategory::RevenueShareDeveloper => Self::revenue_share_developer(),
        };
        Ok(Some(key))
    }

    /// Returns the canonical string form used for persistence and locking.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self.reference_id {
            Some(id) => format!("{}/{}/{}", self.reference, id, self.category),
            None => format!("{}/-/{}", self.reference, self.category),
        }
    }

    /// Parses a canonical pool-key string back into a [`PoolKey`].
    ///
    /// Rejects strings whose category does not belong to the reference
    /// type, and strings whose reference id is absent for anything but
    /// the developer revenue-share pool.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, '/');
        let reference = PoolReference::parse(parts.next()?)?;
        let id_part = parts.next()?;
        let category = DisbursementCategory::parse(parts.next()?)?;

        let reference_id = if id_part == "-" {
            None
        } else {
            Some(Uuid::parse_str(id_part).ok()?)
        };

        let valid = match reference {
            PoolReference::Campaign => {
                reference_id.is_some() && category == DisbursementCategory::CampaignToBeneficiary
            }
            PoolReference::ZakatPeriod => {
                reference_id.is_some() && category == DisbursementCategory::ZakatToMustahiq
            }
            PoolReference::QurbanPeriod => {
                reference_id.is_some()
                    && matches!(
                        category,
                        DisbursementCategory::QurbanPurchaseSapi
                            | DisbursementCategory::QurbanPurchaseKambing
                            | DisbursementCategory::QurbanExecutionFee
                    )
            }
            PoolReference::RevenueShare => match category {
                DisbursementCategory::RevenueShareMitra
                | DisbursementCategory::RevenueShareFundraiser => reference_id.is_some(),
                DisbursementCategory::RevenueShareDeveloper => reference_id.is_none(),
                _ => false,
            },
        };

        valid.then_some(Self {
            reference,
            reference_id,
            category,
        })
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_canonical_form_with_reference_id() {
        let key = PoolKey::campaign(uuid(1));
        assert_eq!(
            key.canonical(),
            "campaign/00000000-0000-0000-0000-000000000001/campaign_to_beneficiary"
        );
    }

    #[test]
    fn test_canonical_form_developer_pool() {
        let key = PoolKey::revenue_share_developer();
        assert_eq!(key.canonical(), "revenue_share/-/revenue_share_developer");
    }

    #[test]
    fn test_parse_round_trip() {
        let keys = [
            PoolKey::campaign(uuid(7)),
            PoolKey::zakat_period(uuid(8)),
            PoolKey::qurban_period(uuid(9), DisbursementCategory::QurbanPurchaseSapi),
            PoolKey::revenue_share(uuid(10), DisbursementCategory::RevenueShareMitra),
            PoolKey::revenue_share_developer(),
        ];
        for key in keys {
            assert_eq!(PoolKey::parse(&key.canonical()), Some(key));
        }
    }

    #[test]
    fn test_parse_rejects_mismatched_category() {
        assert_eq!(
            PoolKey::parse("campaign/00000000-0000-0000-0000-000000000001/zakat_to_mustahiq"),
            None
        );
        assert_eq!(
            PoolKey::parse("qurban_period/00000000-0000-0000-0000-000000000001/vendor_payment"),
            None
        );
    }

    #[test]
    fn test_parse_rejects_missing_or_extra_id() {
        assert_eq!(PoolKey::parse("campaign/-/campaign_to_beneficiary"), None);
        assert_eq!(
            PoolKey::parse(
                "revenue_share/00000000-0000-0000-0000-000000000001/revenue_share_developer"
            ),
            None
        );
        assert_eq!(PoolKey::parse("not-a-key"), None);
    }

    #[test]
    fn test_derive_qurban_sub_pools_are_distinct() {
        let period = uuid(3);
        let sapi =
            PoolKey::derive(DisbursementCategory::QurbanPurchaseSapi, Some(period), None)
                .unwrap()
                .unwrap();
        let kambing =
            PoolKey::derive(DisbursementCategory::QurbanPurchaseKambing, Some(period), None)
                .unwrap()
                .unwrap();
        assert_ne!(sapi, kambing);
        assert_eq!(sapi.reference_id, kambing.reference_id);
    }

    #[test]
    fn test_derive_uncapped_categories_have_no_pool() {
        assert_eq!(
            PoolKey::derive(DisbursementCategory::OperationalExpense, None, None).unwrap(),
            None
        );
        assert_eq!(
            PoolKey::derive(DisbursementCategory::VendorPayment, Some(uuid(4)), None).unwrap(),
            None
        );
    }

    #[test]
    fn test_derive_requires_reference_for_pooled_categories() {
        let err =
            PoolKey::derive(DisbursementCategory::CampaignToBeneficiary, None, None).unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_REQUIRED");
    }

    #[test]
    fn test_derive_revenue_share_keys_per_recipient() {
        let a = PoolKey::derive(DisbursementCategory::RevenueShareMitra, None, Some(uuid(5)))
            .unwrap()
            .unwrap();
        let b = PoolKey::derive(DisbursementCategory::RevenueShareMitra, None, Some(uuid(6)))
            .unwrap()
            .unwrap();
        assert_ne!(a, b);

        let err = PoolKey::derive(DisbursementCategory::RevenueShareFundraiser, None, None)
            .unwrap_err();
        assert_eq!(err.error_code(), "RECIPIENT_REQUIRED");
    }

    #[test]
    fn test_derive_developer_pool_ignores_ids() {
        let key = PoolKey::derive(
            DisbursementCategory::RevenueShareDeveloper,
            Some(uuid(11)),
            Some(uuid(12)),
        )
        .unwrap()
        .unwrap();
        assert_eq!(key, PoolKey::revenue_share_developer());
    }
}
